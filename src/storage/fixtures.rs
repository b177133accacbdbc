//! Demo bills seeded into the in-memory store

use serde_json::{Value, json};

/// Raw demo records, as the remote API returns them
pub fn bill_records() -> Vec<Value> {
    vec![
        json!({
            "id": "47qAXb6fIm2zOKkLzMro",
            "vat": "80",
            "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/justificatifs%2Fpreview-facture-free-201801-pdf-1.jpg",
            "status": "pending",
            "type": "Hôtel et logement",
            "commentary": "séminaire billed",
            "name": "encore",
            "fileName": "preview-facture-free-201801-pdf-1.jpg",
            "date": "2004-04-04",
            "amount": 400,
            "commentAdmin": "ok",
            "email": "a@a",
            "pct": 20
        }),
        json!({
            "id": "BeKy5Mo4jkmdfPGYpTxZ",
            "vat": "",
            "amount": 100,
            "name": "test1",
            "fileName": "1592770761.jpeg",
            "commentary": "plop",
            "pct": 20,
            "type": "Transports",
            "email": "a@a",
            "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/justificatifs%2F1592770761.jpeg",
            "date": "2001-01-01",
            "status": "refused",
            "commentAdmin": "en fait non"
        }),
        json!({
            "id": "UIUZtnPQvnbFnB0ozvJh",
            "name": "test3",
            "email": "a@a",
            "type": "Services en ligne",
            "vat": "60",
            "pct": 20,
            "commentAdmin": "bon bah d'accord",
            "amount": 300,
            "status": "accepted",
            "date": "2003-03-03",
            "commentary": "",
            "fileName": "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
            "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/justificatifs%2Ffacture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png"
        }),
        json!({
            "id": "qcCK3SzECmaZAGRrHjaC",
            "status": "refused",
            "pct": 20,
            "amount": 200,
            "email": "a@a",
            "name": "test2",
            "vat": "40",
            "fileName": "preview-facture-free-201801-pdf-1.jpg",
            "date": "2002-02-02",
            "commentAdmin": "pas la bonne facture",
            "commentary": "test2",
            "type": "Restaurants et bars",
            "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/4.jpg"
        }),
    ]
}
