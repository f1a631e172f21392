//! Static threshold table and alert evaluation.

use serde::Serialize;

use crate::types::UsageSample;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Cpu,
    Memory,
    Disk,
    Swap,
}

impl Domain {
    pub fn label(self) -> &'static str {
        match self {
            Domain::Cpu => "CPU",
            Domain::Memory => "Memory",
            Domain::Disk => "Disk",
            Domain::Swap => "Swap",
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Alert {
    pub domain: Domain,
    pub severity: Severity,
    pub message: String,
    pub value: f32,
}

struct Threshold {
    domain: Domain,
    medium: f32,
    // Swap has no high tier
    high: Option<f32>,
}

// Evaluation order is the output order.
const THRESHOLDS: [Threshold; 4] = [
    Threshold {
        domain: Domain::Cpu,
        medium: 80.0,
        high: Some(90.0),
    },
    Threshold {
        domain: Domain::Memory,
        medium: 85.0,
        high: Some(95.0),
    },
    Threshold {
        domain: Domain::Disk,
        medium: 90.0,
        high: Some(95.0),
    },
    Threshold {
        domain: Domain::Swap,
        medium: 75.0,
        high: None,
    },
];

impl Threshold {
    fn severity(&self, value: f32) -> Option<Severity> {
        match self.high {
            Some(h) if value > h => Some(Severity::High),
            _ if value > self.medium => Some(Severity::Medium),
            _ => None,
        }
    }
}

fn value_for(sample: &UsageSample, domain: Domain) -> f32 {
    match domain {
        Domain::Cpu => sample.cpu,
        Domain::Memory => sample.memory,
        Domain::Disk => sample.disk,
        Domain::Swap => sample.swap,
    }
}

/// Every domain over its threshold, in CPU, Memory, Disk, Swap order.
pub fn evaluate_alerts(sample: &UsageSample) -> Vec<Alert> {
    THRESHOLDS
        .iter()
        .filter_map(|t| {
            let value = value_for(sample, t.domain);
            t.severity(value).map(|severity| Alert {
                domain: t.domain,
                severity,
                message: format!("{} usage is {value:.1}%", t.domain.label()),
                value,
            })
        })
        .collect()
}
