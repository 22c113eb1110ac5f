//! Line parser
//!
//! Tokenizes a line on whitespace and maps it to an [`Input`].

use std::path::PathBuf;

use crate::error::{DbError, Result};
use crate::row::Row;

use super::{Input, MetaCommand, Statement};

/// Parse one line of user input
pub fn parse_line(line: &str) -> Result<Input> {
    let words: Vec<&str> = line.split_whitespace().collect();

    let Some(&first) = words.first() else {
        return Ok(Input::Empty);
    };

    if let Some(name) = first.strip_prefix('.') {
        return parse_meta(name, &words[1..]).map(Input::Meta);
    }

    parse_statement(first, &words[1..]).map(Input::Statement)
}

fn parse_meta(name: &str, args: &[&str]) -> Result<MetaCommand> {
    match name {
        "exit" => Ok(MetaCommand::Exit),
        "open" => match args.first() {
            Some(path) => Ok(MetaCommand::Open {
                path: PathBuf::from(path),
            }),
            None => Err(DbError::Syntax("usage: .open <filename>".to_string())),
        },
        "btree" => Ok(MetaCommand::Btree),
        "constants" => Ok(MetaCommand::Constants),
        other => Err(DbError::UnrecognizedCommand(other.to_string())),
    }
}

fn parse_statement(keyword: &str, args: &[&str]) -> Result<Statement> {
    match keyword {
        "insert" => parse_insert(args),
        "select" => Ok(Statement::Select),
        other => Err(DbError::UnrecognizedStatement(other.to_string())),
    }
}

fn parse_insert(args: &[&str]) -> Result<Statement> {
    let [id, username, email, ..] = args else {
        return Err(DbError::Syntax(
            "usage: insert <id> <username> <email>".to_string(),
        ));
    };

    let id: u32 = id.parse().map_err(|_| {
        DbError::Syntax(format!("id must be a non-negative integer, got {:?}", id))
    })?;

    Ok(Statement::Insert(Row::new(id, *username, *email)))
}
