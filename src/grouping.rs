use crate::record::Record;
use std::cmp::Ordering;
use std::collections::HashMap;

/// All records that share one `activityDay` value.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub day: String,
    pub records: Vec<Record>,
}

/// Records bucketed by day.
///
/// Days iterate in the order they were first seen. Each bucket is sorted by
/// [`parse_order_number`] ascending; rows without a usable number go last
/// and keep their relative order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayGroups {
    groups: Vec<DayGroup>,
    index: HashMap<String, usize>,
}

impl DayGroups {
    pub fn iter(&self) -> impl Iterator<Item = &DayGroup> {
        self.groups.iter()
    }

    pub fn get(&self, day: &str) -> Option<&DayGroup> {
        self.index.get(day).map(|&i| &self.groups[i])
    }

    pub fn days(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.day.as_str())
    }

    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }

    fn push(&mut self, record: Record) {
        let day = record.day();
        match self.index.get(day) {
            Some(&i) => self.groups[i].records.push(record),
            None => {
                self.index.insert(day.to_string(), self.groups.len());
                self.groups.push(DayGroup {
                    day: day.to_string(),
                    records: vec![record],
                });
            }
        }
    }
}

impl FromIterator<Record> for DayGroups {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut groups = DayGroups::default();
        for record in iter {
            groups.push(record);
        }
        for group in &mut groups.groups {
            group
                .records
                .sort_by(|a, b| compare_order(a.order_nr(), b.order_nr()));
        }
        groups
    }
}

/// Bucket records by day and order each bucket.
pub fn group_by_day(records: impl IntoIterator<Item = Record>) -> DayGroups {
    let groups: DayGroups = records.into_iter().collect();
    for group in groups.iter() {
        let unordered = group
            .records
            .iter()
            .filter(|r| parse_order_number(r.order_nr()).is_none())
            .count();
        if unordered > 0 {
            log::warn!(
                "{unordered} exercise(s) in {:?} have no numeric order number",
                group.day
            );
        }
    }
    groups
}

fn compare_order(a: &str, b: &str) -> Ordering {
    match (parse_order_number(a), parse_order_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Read the leading integer of `text` the way `parseInt` does.
///
/// Leading whitespace and a sign are accepted, `0x` switches to base 16 and
/// parsing stops at the first character that is not a digit. Returns `None`
/// when no digit was found. Values beyond `i64` saturate.
pub fn parse_order_number(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, s) = if s.starts_with("0x") || s.starts_with("0X") {
        (16, &s[2..])
    } else {
        (10, s)
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for c in s.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        seen = true;
        value = value.saturating_mul(radix as i64).saturating_add(d as i64);
    }
    seen.then_some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ACTIVITY, ACTIVITY_DAY, ACTIVITY_ORDER_NR};

    fn rec(day: &str, order: &str, name: &str) -> Record {
        [
            (ACTIVITY_DAY, day),
            (ACTIVITY_ORDER_NR, order),
            (ACTIVITY, name),
        ]
        .into_iter()
        .collect()
    }

    fn names(group: &DayGroup) -> Vec<&str> {
        group.records.iter().map(|r| r.activity()).collect()
    }

    #[test]
    fn days_keep_first_seen_order() {
        let groups = group_by_day(vec![
            rec("Day 2", "1", "a"),
            rec("Day 1", "1", "b"),
            rec("Day 2", "2", "c"),
            rec("10", "1", "d"),
            rec("2", "1", "e"),
        ]);
        assert_eq!(
            groups.days().collect::<Vec<_>>(),
            vec!["Day 2", "Day 1", "10", "2"]
        );
    }

    #[test]
    fn sorts_numerically_within_day() {
        let groups = group_by_day(vec![
            rec("D", "10", "ten"),
            rec("D", "2", "two"),
            rec("D", "1", "one"),
        ]);
        assert_eq!(names(groups.get("D").unwrap()), vec!["one", "two", "ten"]);
    }

    #[test]
    fn ties_and_unparseable_numbers_keep_input_order() {
        let groups = group_by_day(vec![
            rec("D", "x", "first-nan"),
            rec("D", "2", "two-a"),
            rec("D", "", "second-nan"),
            rec("D", "2", "two-b"),
            rec("D", "1", "one"),
        ]);
        assert_eq!(
            names(groups.get("D").unwrap()),
            vec!["one", "two-a", "two-b", "first-nan", "second-nan"]
        );
    }

    #[test]
    fn no_record_dropped_or_duplicated() {
        let input = vec![
            rec("A", "3", "a3"),
            rec("", "1", "blank"),
            rec("B", "1", "b1"),
            rec("A", "1", "a1"),
            rec("B", "oops", "b?"),
        ];
        let groups = group_by_day(input.clone());
        assert_eq!(groups.record_count(), input.len());
        let mut got: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.records.iter().map(|r| r.activity()))
            .collect();
        let mut want: Vec<&str> = input.iter().map(|r| r.activity()).collect();
        got.sort();
        want.sort();
        assert_eq!(got, want);
        assert!(groups.get("").is_some());
    }

    #[test]
    fn adjacent_order_numbers_are_non_decreasing() {
        let groups = group_by_day(vec![
            rec("D", "5", "e"),
            rec("D", "-1", "neg"),
            rec("D", "3", "c"),
            rec("D", "03", "c2"),
            rec("D", "12abc", "l"),
        ]);
        let nums: Vec<i64> = groups
            .get("D")
            .unwrap()
            .records
            .iter()
            .filter_map(|r| parse_order_number(r.order_nr()))
            .collect();
        assert!(nums.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn parse_order_number_follows_parse_int() {
        assert_eq!(parse_order_number("7"), Some(7));
        assert_eq!(parse_order_number("  42"), Some(42));
        assert_eq!(parse_order_number("-3"), Some(-3));
        assert_eq!(parse_order_number("+8"), Some(8));
        assert_eq!(parse_order_number("12abc"), Some(12));
        assert_eq!(parse_order_number("3.9"), Some(3));
        assert_eq!(parse_order_number("0x1A"), Some(26));
        assert_eq!(parse_order_number(""), None);
        assert_eq!(parse_order_number("abc"), None);
        assert_eq!(parse_order_number("-"), None);
        assert_eq!(parse_order_number("99999999999999999999999"), Some(i64::MAX));
    }
}
