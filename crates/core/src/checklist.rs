//! Default daily checklist.
//!
//! The server treats `dailyProgress` as opaque JSON. The only place its shape
//! matters is when a document is synthesized for a key that has never been
//! written, where every known task starts out incomplete.

use serde_json::{Map, Value};

/// Checklist groups and the task keys within each group.
pub const DEFAULT_CHECKLIST: &[(&str, &[&str])] = &[
    ("gathering", &["vine_bridge", "prosperity", "destinys_gorge"]),
    (
        "crafting",
        &["mithrillium", "elonian_cord", "spirit_residue", "gossamer"],
    ),
    ("specials", &["psna", "home_instance"]),
];

/// Build the zero-valued `dailyProgress` document: every task `false`.
pub fn default_daily_progress() -> Value {
    let groups = DEFAULT_CHECKLIST
        .iter()
        .map(|(group, tasks)| {
            let tasks: Map<String, Value> = tasks
                .iter()
                .map(|task| ((*task).to_string(), Value::Bool(false)))
                .collect();
            ((*group).to_string(), Value::Object(tasks))
        })
        .collect::<Map<String, Value>>();

    Value::Object(groups)
}

/// Today's date in UTC as an ISO `YYYY-MM-DD` key.
pub fn today_key() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_leaves(value: &Value, out: &mut Vec<Value>) {
        match value {
            Value::Object(map) => map.values().for_each(|v| all_leaves(v, out)),
            other => out.push(other.clone()),
        }
    }

    #[test]
    fn default_has_every_group() {
        let progress = default_daily_progress();
        for (group, tasks) in DEFAULT_CHECKLIST {
            let entry = &progress[*group];
            assert!(entry.is_object(), "missing group {group}");
            assert_eq!(entry.as_object().unwrap().len(), tasks.len());
        }
    }

    #[test]
    fn default_tasks_are_all_false() {
        let mut leaves = Vec::new();
        all_leaves(&default_daily_progress(), &mut leaves);

        assert_eq!(leaves.len(), 9);
        assert!(leaves.iter().all(|v| *v == Value::Bool(false)));
    }

    #[test]
    fn vine_bridge_lives_under_gathering() {
        assert_eq!(
            default_daily_progress()["gathering"]["vine_bridge"],
            Value::Bool(false)
        );
    }

    #[test]
    fn today_key_is_iso_date() {
        let key = today_key();
        assert_eq!(key.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&key, "%Y-%m-%d").is_ok());
    }
}
