//! End-to-end import, analysis and reporting through the service.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use perfslope_lib::{
    AnalysisService, CancellationToken, InMemorySessionStore, ReportRequest, ServiceError,
    SessionStore, SlopeRequest, ValueScale,
};

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, 8)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// One hour of one-minute samples: a leaking process and a flat counter.
fn export() -> Vec<u8> {
    let mut text = String::from(
        "\u{feff}\"(PDH-CSV 4.0) (Tokyo Standard Time)(540)\",\
         \"\\\\WEB01\\Process(w3wp)\\Private Bytes\",\
         \"\\\\WEB01\\Memory\\Committed Bytes\"\r\n",
    );
    for minute in 0..60 {
        let ts = start() + TimeDelta::minutes(minute);
        let leak = 50_000_000 + 8192 * minute;
        let value = if minute % 7 == 3 { String::new() } else { leak.to_string() };
        text.push_str(&format!(
            "\"{}\",\"{value}\",\"2000000000\"\r\n",
            ts.format("%m/%d/%Y %H:%M:%S%.3f")
        ));
    }
    text.into_bytes()
}

#[tokio::test]
async fn upload_analyse_and_report() {
    let store = InMemorySessionStore::shared();
    let service = AnalysisService::new(store.clone(), ValueScale::Kilobytes);

    let upload = service
        .upload(export().as_slice(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(upload.counters.len(), 2);
    assert_eq!(upload.counters[0].identity.instance_name, "w3wp");
    assert_eq!(upload.counters[0].len(), 60);
    assert!(upload.counters[0].valid_len() < 60);
    assert!(store.exists(upload.session_id));

    let end = start() + TimeDelta::minutes(59);
    let id = upload.session_id.to_string();
    let slopes = service.slope(&SlopeRequest::new(&id, start(), end)).unwrap();
    assert_eq!(slopes.results.len(), 2);

    let leak = &slopes.results[0];
    assert!((leak.slope_per_10min - 80.0).abs() < 1e-6);
    assert!((leak.r_squared - 1.0).abs() < 1e-9);
    assert!(leak.is_warning);

    let flat = &slopes.results[1];
    assert_eq!(flat.slope_per_10min, 0.0);
    assert_eq!(flat.r_squared, 1.0);
    assert!(!flat.is_warning);

    let relaxed = service
        .slope(&SlopeRequest::new(&id, start(), end).with_threshold(100.0))
        .unwrap();
    assert!(relaxed.results.iter().all(|r| !r.is_warning));

    let report = service
        .report(&ReportRequest::new(&id, start(), end))
        .unwrap();
    assert_eq!(report.content_type, "text/html");
    assert!(report.file_name.ends_with(".html"));
    assert!(report.content.contains("<td>w3wp</td><td>Private Bytes</td><td>80.00</td>"));
    assert!(report.content.contains("<p>Warnings: 1</p>"));
    assert!(report.content.contains("No chart image provided."));
}

#[tokio::test]
async fn expired_sessions_are_not_found() {
    let store = InMemorySessionStore::shared();
    let service = AnalysisService::new(store.clone(), ValueScale::Kilobytes);
    let upload = service
        .upload(export().as_slice(), &CancellationToken::new())
        .await
        .unwrap();

    let later = chrono::Utc::now() + TimeDelta::hours(1);
    let removed = store.sweep_expired_at(later, TimeDelta::minutes(30));
    assert_eq!(removed, vec![upload.session_id]);

    let err = service
        .slope(&SlopeRequest::new(
            upload.session_id.to_string(),
            start(),
            start() + TimeDelta::minutes(59),
        ))
        .unwrap_err();
    assert!(matches!(err, ServiceError::SessionNotFound(_)));
}

#[tokio::test]
async fn service_over_shared_trait_object() {
    let store: Arc<dyn SessionStore> = InMemorySessionStore::shared();
    let service = AnalysisService::new(Arc::clone(&store), ValueScale::Native);
    let upload = service
        .upload(export().as_slice(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(store.len(), 1);

    let data = service
        .data(
            &upload.session_id.to_string(),
            Some((start(), start() + TimeDelta::minutes(9))),
        )
        .unwrap();
    assert_eq!(data.counters[1].len(), 10);
}
