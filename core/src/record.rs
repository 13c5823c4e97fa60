//! Input records: the two line shapes of a case file.
//!
//!   CODE AMOUNT             direct arrivals at CODE
//!   ORIGIN DEST PERCENT     PERCENT% of ORIGIN's volume flows to DEST
//!
//! Tokens are whitespace-separated. Blank lines and lines of any other
//! shape are skipped. A numeric token that does not parse is fatal.

use crate::{
    error::{FlowError, FlowResult},
    types::AirportCode,
};
use serde::{Deserialize, Serialize};
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    DirectArrival {
        code:   AirportCode,
        amount: f64,
    },
    Flow {
        origin:  AirportCode,
        dest:    AirportCode,
        /// Human percentage: 35.0 means 35%.
        percent: f64,
    },
}

impl Record {
    /// Canonical text form, one line, no trailing newline.
    pub fn to_line(&self) -> String {
        match self {
            Record::DirectArrival { code, amount } => format!("{code} {amount}"),
            Record::Flow { origin, dest, percent } => format!("{origin} {dest} {percent}"),
        }
    }
}

/// Parse one line. `line_no` is 1-based and only used for error reporting.
pub fn parse_line(line_no: usize, line: &str) -> FlowResult<Option<Record>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Ok(None),
        [code, amount] => Ok(Some(Record::DirectArrival {
            code:   (*code).to_string(),
            amount: parse_number(line_no, amount)?,
        })),
        [origin, dest, percent] => Ok(Some(Record::Flow {
            origin:  (*origin).to_string(),
            dest:    (*dest).to_string(),
            percent: parse_number(line_no, percent)?,
        })),
        other => {
            log::debug!("line {line_no}: ignoring record with {} tokens", other.len());
            Ok(None)
        }
    }
}

/// Parse every line from `reader`, in order.
pub fn parse_records<R: BufRead>(reader: R) -> FlowResult<Vec<Record>> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(record) = parse_line(i + 1, &line)? {
            records.push(record);
        }
    }
    log::debug!("parsed {} records", records.len());
    Ok(records)
}

fn parse_number(line: usize, token: &str) -> FlowResult<f64> {
    token.parse::<f64>().map_err(|_| FlowError::Format {
        line,
        token: token.to_string(),
    })
}
