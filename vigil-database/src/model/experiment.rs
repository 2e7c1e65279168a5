use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an experiment. Stored as an integer column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ExperimentStatus {
    Init,
    Active,
    Paused,
    Deleted,
}

impl From<ExperimentStatus> for i64 {
    fn from(status: ExperimentStatus) -> Self {
        match status {
            ExperimentStatus::Init => 0,
            ExperimentStatus::Active => 1,
            ExperimentStatus::Paused => 2,
            ExperimentStatus::Deleted => 3,
        }
    }
}

impl TryFrom<i64> for ExperimentStatus {
    type Error = anyhow::Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ExperimentStatus::Init),
            1 => Ok(ExperimentStatus::Active),
            2 => Ok(ExperimentStatus::Paused),
            3 => Ok(ExperimentStatus::Deleted),
            other => bail!("unknown experiment status {other}"),
        }
    }
}

/// An A/B-testing experiment record.
#[derive(Clone, Debug, Serialize)]
pub struct Experiment {
    pub id: i64,
    pub name: String,
    /// Free-form JSON payload describing the experiment.
    pub value: serde_json::Value,
    pub status: ExperimentStatus,
    /// Unix seconds.
    pub created: u64,
    /// Unix seconds.
    pub updated: u64,
    pub created_by: String,
    pub updated_by: String,
}

#[cfg(test)]
mod tests {
    use super::ExperimentStatus;

    #[test]
    fn status_round_trips_through_i64() {
        for status in [
            ExperimentStatus::Init,
            ExperimentStatus::Active,
            ExperimentStatus::Paused,
            ExperimentStatus::Deleted,
        ] {
            let raw = i64::from(status);
            assert_eq!(ExperimentStatus::try_from(raw).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(ExperimentStatus::try_from(4).is_err());
        assert!(ExperimentStatus::try_from(-1).is_err());
    }

    #[test]
    fn status_serializes_as_integer() {
        let encoded = serde_json::to_string(&ExperimentStatus::Active).unwrap();
        assert_eq!(encoded, "1");

        let decoded: ExperimentStatus = serde_json::from_str("2").unwrap();
        assert_eq!(decoded, ExperimentStatus::Paused);
    }
}
