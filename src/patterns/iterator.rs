//! Iterator: sequential access without exposing the collection.

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

const NUMBERS_IN_GERMAN: [&str; 5] = ["eins", "zwei", "drei", "vier", "funf"];

/// German numerals from one up to `count`, capped at five.
pub fn count_to(count: usize) -> impl Iterator<Item = &'static str> + Clone {
    NUMBERS_IN_GERMAN.iter().copied().take(count)
}

/// Inclusive integer range with an explicit cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numbers {
    current: i64,
    end: i64,
    done: bool,
}

impl Numbers {
    pub fn new(start: i64, end: i64) -> Self {
        Self { current: start, end, done: start > end }
    }
}

impl Iterator for Numbers {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.done {
            return None;
        }
        let value = self.current;
        // `end` may be i64::MAX, so stop on it instead of stepping past it
        if value == self.end {
            self.done = true;
        } else {
            self.current += 1;
        }
        Some(value)
    }
}

#[derive(Debug, Default)]
pub struct IteratorDemo;

impl PatternDemo for IteratorDemo {
    fn name(&self) -> &str {
        "iterator"
    }

    fn description(&self) -> &str {
        "Iterator: a German-numeral generator and a hand-written range iterator"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        for count in [3, 4] {
            for number in count_to(count) {
                out.emit(number.to_string());
            }
        }

        let mut numbers = Numbers::new(1, 5);
        for _ in 0..5 {
            let value = numbers
                .next()
                .ok_or_else(|| DemoError::new("Numbers iterator ended early"))?;
            out.emit(value.to_string());
        }

        for value in Numbers::new(1, 6) {
            out.emit(value.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_to_caps_at_five() {
        assert_eq!(count_to(2).collect::<Vec<_>>(), vec!["eins", "zwei"]);
        assert_eq!(count_to(9).count(), 5);
        assert_eq!(count_to(0).next(), None);
    }

    #[test]
    fn test_numbers_is_inclusive_and_exhausts() {
        let mut numbers = Numbers::new(1, 2);
        assert_eq!(numbers.next(), Some(1));
        assert_eq!(numbers.next(), Some(2));
        assert_eq!(numbers.next(), None);
        assert_eq!(numbers.next(), None);
    }

    #[test]
    fn test_numbers_ending_at_i64_max() {
        let values: Vec<i64> = Numbers::new(i64::MAX - 1, i64::MAX).collect();
        assert_eq!(values, vec![i64::MAX - 1, i64::MAX]);

        let mut single = Numbers::new(i64::MAX, i64::MAX);
        assert_eq!(single.next(), Some(i64::MAX));
        assert_eq!(single.next(), None);
    }

    #[test]
    fn test_numbers_empty_range() {
        assert_eq!(Numbers::new(3, 1).count(), 0);
    }

    #[test]
    fn test_demo_output() {
        let mut out: Vec<String> = Vec::new();
        IteratorDemo.run(&mut out).unwrap();
        let expected: Vec<String> = ["eins", "zwei", "drei", "eins", "zwei", "drei", "vier"]
            .iter()
            .map(|s| s.to_string())
            .chain((1..=5).map(|n| n.to_string()))
            .chain((1..=6).map(|n| n.to_string()))
            .collect();
        assert_eq!(out, expected);
    }
}
