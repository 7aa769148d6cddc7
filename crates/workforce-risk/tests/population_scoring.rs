use std::io::Cursor;

use workforce_risk::datasets::SignalImporter;
use workforce_risk::risk::{write_results_csv, Component, RiskEngine, RiskTier, Scenario};

const EPSILON: f64 = 1e-9;

const SIGNALS: &str = "\u{feff}Employee ID,Performance Rating,reward_points,Total_Leave_Days,Onboarding_Concern_Flag,Mentor_Assigned,Initial_Training_Completed,Work_Hours,Vibe_Score
EMP1,4,1516,0,False,True,True,10,5
EMP2,,,,,,,,
EMP3,2,758,15.5,True,False,Yes,n/a,2.5
EMP4,NaN,abc,31,no,1,0,8,4
";

fn approx(actual: Option<f64>, expected: f64) -> bool {
    actual.is_some_and(|value| (value - expected).abs() < EPSILON)
}

#[test]
fn csv_export_scores_and_tiers_the_population() {
    let import = SignalImporter::default()
        .import_reader(Cursor::new(SIGNALS))
        .expect("signal table imports");
    assert!(import.missing_columns.is_empty());
    assert_eq!(import.records.len(), 4);

    let report = RiskEngine::standard()
        .score_population(&import.records)
        .expect("unique ids");

    let exemplary = report.employee("EMP1").expect("EMP1 scored");
    for component in Component::ALL {
        assert!(approx(exemplary.value(component), 1.0));
    }

    let empty = report.employee("EMP2").expect("EMP2 scored");
    assert!(Component::ALL
        .iter()
        .all(|component| empty.value(*component).is_none()));
    assert_eq!(empty.crs, 0.0);
    assert_eq!(empty.crr, 0.0);
    assert!(!empty.flagged);

    let partial = report.employee("EMP3").expect("EMP3 scored");
    assert!(approx(partial.value(Component::Performance), 0.5));
    assert!(approx(partial.value(Component::Behavioral), 0.35));
    assert!(approx(partial.value(Component::Engagement), 0.5));
    assert_eq!(partial.value(Component::WorkHours), None);
    assert!(approx(Some(partial.crs), 0.4125));
    assert!(approx(Some(partial.crr), 0.4125 / 0.9));
    assert_eq!(
        partial.scenarios,
        vec![
            Scenario::LowVibe,
            Scenario::PoorPerformance,
            Scenario::LowEngagement
        ]
    );

    let unparsed = report.employee("EMP4").expect("EMP4 scored");
    assert_eq!(unparsed.value(Component::Performance), None);
    assert!(approx(unparsed.value(Component::Engagement), 0.5));
    assert!(approx(Some(unparsed.crr), 0.47 / 0.8));
    assert_eq!(unparsed.tier(Component::Vibe), RiskTier::Moderate);
    assert_eq!(unparsed.tier(Component::Performance), RiskTier::Unknown);
    assert!(!unparsed.flagged);

    assert_eq!(report.summary.flagged_employees, 2);
    assert!((report.summary.flagged_pct - 50.0).abs() < EPSILON);
}

#[test]
fn results_csv_round_trips_the_report_shape() {
    let import = SignalImporter::default()
        .import_reader(SIGNALS.as_bytes())
        .expect("signal table imports");
    let report = RiskEngine::standard()
        .score_population(&import.records)
        .expect("unique ids");

    let mut buffer = Vec::new();
    write_results_csv(&report, &mut buffer).expect("results written");

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers = reader.headers().expect("header row").clone();
    assert_eq!(headers.len(), 15);
    assert_eq!(&headers[0], "Employee_ID");
    assert_eq!(&headers[14], "Sent");

    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("rows parse");
    assert_eq!(rows.len(), 4);

    let empty = &rows[1];
    assert_eq!(&empty[0], "EMP2");
    assert!((1..=5).all(|index| empty[index].is_empty()));
    assert_eq!(&empty[6], "0");
    assert!((8..=13).all(|index| empty[index].is_empty()));
    assert_eq!(&empty[14], "No");

    let partial = &rows[2];
    assert_eq!(&partial[8], "Low");
    assert_eq!(&partial[11], "");
    assert!(partial[13].contains("Retaining talent and addressing dissatisfaction early"));
    assert_eq!(&partial[14], "Yes");
}

#[test]
fn rescoring_after_membership_change_moves_thresholds() {
    let import = SignalImporter::default()
        .import_reader(SIGNALS.as_bytes())
        .expect("signal table imports");
    let engine = RiskEngine::standard();

    let full = engine
        .score_population(&import.records)
        .expect("unique ids");
    let reduced = engine
        .score_population(&import.records[1..])
        .expect("unique ids");

    let full_vibe = full.thresholds.get(Component::Vibe).expect("vibe data");
    let reduced_vibe = reduced.thresholds.get(Component::Vibe).expect("vibe data");
    assert!(reduced_vibe.p75 < full_vibe.p75);

    // EMP4 becomes the top of the vibe distribution once EMP1 leaves
    let emp4 = reduced.employee("EMP4").expect("EMP4 scored");
    assert_eq!(emp4.tier(Component::Vibe), RiskTier::High);
}
