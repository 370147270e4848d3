//! Plain-text device table

use crate::config::Configuration;
use crate::disk::DeviceNode;
use std::fmt;

/// Space added after the widest cell of every column
const COLUMN_GAP: usize = 2;

/// A left-aligned text table
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given headers
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing trailing cells render empty
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths.iter().map(|w| w + COLUMN_GAP).collect()
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        line.push_str(&format!("{:<width$}", cell, width = width));
    }
    writeln!(f, "{}", line.trim_end())
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_line(f, &self.columns, &widths)?;
        for row in &self.rows {
            write_line(f, row, &widths)?;
        }
        Ok(())
    }
}

/// Build the `ls` table: one row per disk, one indented row per descendant
///
/// Nested devices (crypt or LVM volumes under a partition) are indented one
/// level further, the way lsblk draws them. Every non-disk row shows the
/// first alias, in file order, bound to its UUID.
pub fn device_table(devices: &[DeviceNode], config: &Configuration) -> Table {
    let mut table = Table::new(&["NAME", "LABEL", "MOUNTPOINT", "ALIAS"]);

    for disk in devices {
        table.push_row(vec![
            disk.name.clone(),
            disk.label.clone().unwrap_or_default(),
            disk.mountpoint.clone().unwrap_or_default(),
            String::new(),
        ]);
        push_children(&mut table, disk, "", config);
    }

    table
}

fn push_children(table: &mut Table, parent: &DeviceNode, indent: &str, config: &Configuration) {
    let last = parent.children.len().saturating_sub(1);
    for (i, part) in parent.children.iter().enumerate() {
        let (branch, stem) = if i == last {
            ("└─", "  ")
        } else {
            ("├─", "│ ")
        };
        let alias = part
            .uuid
            .as_deref()
            .and_then(|uuid| config.alias_for_uuid(uuid))
            .map(|a| a.alias.clone())
            .unwrap_or_default();

        table.push_row(vec![
            format!("{}{}{}", indent, branch, part.name),
            part.label.clone().unwrap_or_default(),
            part.mountpoint.clone().unwrap_or_default(),
            alias,
        ]);

        if part.has_children() {
            push_children(table, part, &format!("{}{}", indent, stem), config);
        }
    }
}
