//! Shallow versus deep copies of a nested list.
//!
//! Rows are `Rc<RefCell<_>>` so a shallow copy shares them; a deep copy owns
//! fresh rows.

use std::cell::RefCell;
use std::rc::Rc;

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

pub type Row = Rc<RefCell<Vec<i32>>>;

/// Build a nested list with shareable rows.
pub fn nested(rows: &[&[i32]]) -> Vec<Row> {
    rows.iter().map(|row| Rc::new(RefCell::new(row.to_vec()))).collect()
}

/// New outer list, same rows.
pub fn shallow_copy(list: &[Row]) -> Vec<Row> {
    list.to_vec()
}

/// New outer list and new rows.
pub fn deep_copy(list: &[Row]) -> Vec<Vec<i32>> {
    list.iter().map(|row| row.borrow().clone()).collect()
}

/// Render like a nested list literal, e.g. `[[1, 2], [3, 4]]`.
pub fn render(list: &[Row]) -> String {
    format!("{:?}", deep_copy(list))
}

#[derive(Debug, Default)]
pub struct CopyingDemo;

impl PatternDemo for CopyingDemo {
    fn name(&self) -> &str {
        "copying"
    }

    fn description(&self) -> &str {
        "Copying: a shallow copy shares nested rows, a deep copy does not"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        let original = nested(&[&[1, 2], &[3, 4]]);
        let shallow = shallow_copy(&original);
        let deep = deep_copy(&original);

        let first = original.first().ok_or_else(|| DemoError::new("empty list"))?;
        if let Some(cell) = first.borrow_mut().first_mut() {
            *cell = 100;
        }

        out.emit(format!("Original List: {}", render(&original)));
        out.emit(format!("Shallow Copied List: {}", render(&shallow)));
        out.emit(format!("Deep Copied List: {:?}", deep));
        Ok(())
    }
}
