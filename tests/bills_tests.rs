//! Bills page: listing, ordering and click handlers

mod common;

use billed::prelude::*;
use common::*;
use serde_json::{Value, json};

fn null_bill() -> Value {
    json!({
        "id": "47qAXb6fIm2zOKkLzMro",
        "vat": null,
        "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a…f-1.jpg?alt=media&token=c1640e12-a24b-4b11-ae52-529112e9602a",
        "status": null,
        "type": null,
        "commentary": null,
        "name": null,
        "fileName": "preview-facture-free-201801-pdf-1.jpg",
        "date": null,
        "amount": null,
        "commentAdmin": null,
        "email": null,
        "pct": null,
    })
}

mod listing_tests {
    use super::*;

    #[test]
    fn test_bills_ordered_from_latest_to_earliest() {
        let views = Views::new().unwrap();
        let rows = BillsList::from_records(&fixtures::bill_records()).rows();

        let html = views.bills_page(&BillsPage::Loaded(rows)).unwrap();
        let dates = rendered_dates(&html);

        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
        assert_eq!(dates.len(), 4);
    }

    #[test]
    fn test_null_bills_are_not_displayed() {
        let mut records = fixtures::bill_records();
        records.push(null_bill());

        let rows = BillsList::from_records(&records).rows();
        let html = Views::new()
            .unwrap()
            .bills_page(&BillsPage::Loaded(rows))
            .unwrap();

        assert_eq!(rendered_dates(&html).len(), records.len() - 1);
    }

    #[test]
    fn test_unparseable_dates_are_not_displayed() {
        let mut records = fixtures::bill_records();
        records.push(json!({"id": "a", "date": "31/12/2020"}));
        records.push(json!({"id": "b", "date": ""}));
        records.push(json!({"id": "c", "date": "2020-02-30"}));

        let rows = BillsList::from_records(&records).rows();

        assert_eq!(rows.len(), records.len() - 3);
    }

    #[test]
    fn test_only_the_date_decides_display() {
        let records = vec![
            json!({"date": "2020-01-01", "vat": 70}),
            json!({"date": "2021-01-01", "amount": 12.5}),
            json!({"date": "2022-01-01", "pct": "20"}),
            json!({"date": "2019-01-01"}),
            json!({"date": 20190101, "name": "numeric date"}),
        ];

        let rows = BillsList::from_records(&records).rows();
        let html = Views::new()
            .unwrap()
            .bills_page(&BillsPage::Loaded(rows))
            .unwrap();

        assert_eq!(rendered_dates(&html).len(), records.len() - 1);
    }

    #[test]
    fn test_ties_keep_fetch_order() {
        let records = vec![
            json!({"id": "first", "date": "2020-01-01"}),
            json!({"id": "newer", "date": "2021-01-01"}),
            json!({"id": "second", "date": "2020-01-01"}),
        ];

        let ids: Vec<_> = BillsList::from_records(&records)
            .rows()
            .into_iter()
            .filter_map(|row| row.id)
            .collect();

        assert_eq!(ids, ["newer", "first", "second"]);
    }
}

mod handler_tests {
    use super::*;

    #[test]
    fn test_every_eye_icon_previews_its_receipt() {
        let rows = BillsList::from_records(&fixtures::bill_records()).rows();
        let urls: Vec<_> = fixtures::bill_records()
            .iter()
            .filter_map(|record| record["fileUrl"].as_str().map(str::to_string))
            .collect();

        for row in &rows {
            match Bills.handle_click_icon_eye(row) {
                Intent::ShowReceipt { file_url } => assert!(urls.contains(&file_url)),
                other => panic!("unexpected intent {:?}", other),
            }
        }
    }

    #[test]
    fn test_new_bill_button_navigates() {
        assert_eq!(Bills.handle_click_new_bill(), Intent::navigate(Route::NewBill));
    }
}

mod fetch_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetches_bills_from_mock_api() {
        let store = seeded_store();

        let rows = Bills.get_bills(&store).await.unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(store.calls().list, 1);
    }

    #[tokio::test]
    async fn test_fetch_keeps_mistyped_records() {
        let mut records = fixtures::bill_records();
        records.push(json!({"id": "x", "date": "2010-10-10", "vat": 70, "amount": 12.5}));
        let store = InMemoryBillStore::with_records(BASE_URL, records);

        let rows = Bills.get_bills(&store).await.unwrap();

        assert_eq!(rows.len(), 5);
        assert!(rows.iter().any(|row| row.id.as_deref() == Some("x")));
    }

    #[tokio::test]
    async fn test_fetch_fails_with_404_message() {
        let store = seeded_store();
        store.fail_next_list(StoreError::Remote { status: 404 });

        let page = match Bills.get_bills(&store).await {
            Ok(rows) => BillsPage::Loaded(rows),
            Err(error) => BillsPage::Error(error.to_string()),
        };
        let html = Views::new().unwrap().bills_page(&page).unwrap();

        assert!(html.contains("Erreur 404"));
    }

    #[tokio::test]
    async fn test_fetch_fails_with_500_message() {
        let store = seeded_store();
        store.fail_next_list(StoreError::Remote { status: 500 });

        let error = Bills.get_bills(&store).await.unwrap_err();

        assert_eq!(error.to_string(), "Erreur 500");
    }

    #[test]
    fn test_loading_state_renders_loading() {
        let html = Views::new().unwrap().bills_page(&BillsPage::Loading).unwrap();
        assert!(html.contains("Loading..."));
    }
}
