use serde::{Deserialize, Deserializer, Serialize};

/// One machine as reported by a single `/status` read.
///
/// `id` is the identity; every other field is replaced wholesale on the next poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineState {
    pub id: u64,

    #[serde(default)]
    pub busy: bool,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub user: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub wing: Option<String>,

    /// Seconds left on the current cycle.
    #[serde(default, deserialize_with = "non_negative")]
    pub remaining: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItem {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub wing: String,

    /// Requested cycle length in seconds.
    #[serde(default, deserialize_with = "non_negative")]
    pub duration: u64,

    /// Submission order assigned by the server; unique and increasing.
    pub seq: u64,
}

/// One consistent read of all machine and queue state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub machines: Vec<MachineState>,

    #[serde(default)]
    pub queue: Vec<QueueItem>,
}

impl Snapshot {
    /// Baseline used before the first successful poll.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn busy_count(&self) -> usize {
        self.machines.iter().filter(|m| m.busy).count()
    }
}

/// A machine finished its cycle since the previous snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompletionEvent {
    pub machine_id: u64,

    /// Who was using the machine, taken from the previous snapshot.
    pub user: Option<String>,
}

fn blank_as_none<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<String>::deserialize(de)?;
    Ok(v.filter(|s| !s.trim().is_empty()))
}

fn non_negative<'de, D>(de: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<i64>::deserialize(de)?;
    Ok(v.map(|n| n.max(0) as u64).unwrap_or(0))
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
