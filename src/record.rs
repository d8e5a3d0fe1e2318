use serde::ser::{Serialize, SerializeMap, Serializer};

pub const ACTIVITY_DAY: &str = "activityDay";
pub const ACTIVITY_ORDER_NR: &str = "activityOrderNr";
pub const ACTIVITY: &str = "activity";
pub const WARMUP: &str = "warmup";
pub const SETS_MIN: &str = "setsMin";
pub const SETS_MAX: &str = "setsMax";
pub const REPS_MIN: &str = "repsMin";
pub const REPS_MAX: &str = "repsMax";
pub const REPS_UNIT: &str = "repsUnit";
pub const INSTRUCTION_VIDEO_1: &str = "instructionVideo1";
pub const INSTRUCTION_VIDEO_2: &str = "instructionVideo2";

/// One parsed program row.
///
/// Fields keep the order of the header row. Looking up a field that the
/// header did not declare yields an empty string, so callers never have to
/// deal with a missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `name`. A repeated name overwrites the earlier
    /// value but keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> &str {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn day(&self) -> &str {
        self.get(ACTIVITY_DAY)
    }

    pub fn order_nr(&self) -> &str {
        self.get(ACTIVITY_ORDER_NR)
    }

    pub fn activity(&self) -> &str {
        self.get(ACTIVITY)
    }

    pub fn is_warmup(&self) -> bool {
        self.get(WARMUP) == "1"
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_reads_as_empty() {
        let r: Record = [(ACTIVITY, "Squat")].into_iter().collect();
        assert_eq!(r.activity(), "Squat");
        assert_eq!(r.day(), "");
        assert!(!r.contains(ACTIVITY_DAY));
        assert!(!r.is_warmup());
    }

    #[test]
    fn repeated_name_overwrites_in_place() {
        let mut r = Record::new();
        r.insert("a", "1");
        r.insert("b", "2");
        r.insert("a", "3");
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn warmup_only_for_literal_one() {
        let yes: Record = [(WARMUP, "1")].into_iter().collect();
        let no: Record = [(WARMUP, "true")].into_iter().collect();
        assert!(yes.is_warmup());
        assert!(!no.is_warmup());
    }

    #[test]
    fn serializes_as_ordered_map() {
        let r: Record = [("z", "1"), ("a", "2")].into_iter().collect();
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"z":"1","a":"2"}"#);
    }
}
