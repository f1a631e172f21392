//! Threshold table behaviour.
use macmon::alerts::{evaluate_alerts, Domain, Severity};
use macmon::report::{build_alert_summary, NO_ALERTS};
use macmon::types::UsageSample;

fn usage(cpu: f32, memory: f32, disk: f32, swap: f32) -> UsageSample {
    UsageSample {
        cpu,
        memory,
        disk,
        swap,
    }
}

#[test]
fn single_medium_cpu_alert() {
    let alerts = evaluate_alerts(&usage(85.0, 50.0, 50.0, 10.0));
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].domain, Domain::Cpu);
    assert_eq!(alerts[0].severity, Severity::Medium);
    assert_eq!(alerts[0].message, "CPU usage is 85.0%");
    assert_eq!(alerts[0].value, 85.0);
}

#[test]
fn every_domain_reported_in_table_order() {
    let alerts = evaluate_alerts(&usage(95.0, 97.0, 96.0, 80.0));
    let got: Vec<(Domain, Severity)> = alerts.iter().map(|a| (a.domain, a.severity)).collect();
    assert_eq!(
        got,
        vec![
            (Domain::Cpu, Severity::High),
            (Domain::Memory, Severity::High),
            (Domain::Disk, Severity::High),
            (Domain::Swap, Severity::Medium),
        ]
    );
}

#[test]
fn thresholds_are_strict() {
    assert!(evaluate_alerts(&usage(80.0, 85.0, 90.0, 75.0)).is_empty());
    let at_high = evaluate_alerts(&usage(90.0, 95.0, 95.0, 100.0));
    assert!(at_high.iter().all(|a| a.severity == Severity::Medium));
    assert_eq!(at_high.len(), 4);
}

#[test]
fn swap_never_goes_high() {
    let alerts = evaluate_alerts(&usage(0.0, 0.0, 0.0, 99.9));
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].domain, Domain::Swap);
    assert_eq!(alerts[0].severity, Severity::Medium);
}

#[test]
fn summary_text() {
    assert_eq!(build_alert_summary(&[]), NO_ALERTS);

    let alerts = evaluate_alerts(&usage(95.0, 50.0, 92.0, 0.0));
    let text = build_alert_summary(&alerts);
    let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines[0], "⚠️ **System Alerts**");
    assert_eq!(lines[1], "🔴 **CPU**: CPU usage is 95.0%");
    assert_eq!(lines[2], "🟡 **Disk**: Disk usage is 92.0%");
    assert_eq!(lines.len(), 3);
}
