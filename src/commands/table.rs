use rawprompt::{StdTerminal, Table};

use super::Failure;

pub fn run(columns: Vec<String>, rows: &[String]) {
    super::finish(run_inner(columns, rows));
}

fn run_inner(columns: Vec<String>, rows: &[String]) -> Result<(), Failure> {
    let mut table = Table::new(columns.iter().map(|c| c.trim()));
    for row in rows {
        table.push_row(row.split(',').map(str::trim));
    }
    table.print(&mut StdTerminal::new())?;
    Ok(())
}
