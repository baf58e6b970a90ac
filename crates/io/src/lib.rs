#![forbid(unsafe_code)]

use anyhow::{anyhow, Context, Result};
use lpstudio_core::form::ProblemForm;
use lpstudio_core::solution::SolveResult;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

pub const EXAMPLE_FORM_JSON: &str = r#"
{
  "direction": "maximize",
  "objective": [3.0, 2.0],
  "constraints": [
    { "coefficients": [1.0, 1.0], "relation": "<=", "rhs": 4.0 },
    { "coefficients": [1.0, 0.0], "relation": "<=", "rhs": 3.0 }
  ]
}
"#;

pub const EXAMPLE_DESCRIPTION: &str =
    "Mix de produção: maximizar 3x1 + 2x2 com x1 + x2 <= 4 e x1 <= 3.";

pub fn example_form() -> Result<ProblemForm> {
    parse_json_form(EXAMPLE_FORM_JSON)
}

pub fn parse_json_form(contents: &str) -> Result<ProblemForm> {
    match serde_json::from_str::<ProblemForm>(contents) {
        Ok(form) => Ok(form),
        Err(parse_err) => {
            if serde_json::from_str::<SolveResult>(contents).is_ok() {
                Err(anyhow!(
                    "JSON contains a solve result, but a problem form (with 'direction', 'objective' and 'constraints') is expected."
                ))
            } else {
                Err(parse_err).context("failed to parse JSON problem")
            }
        }
    }
}

pub fn read_json_form<P: AsRef<Path>>(path: P) -> Result<ProblemForm> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {:?}", path))?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .with_context(|| format!("failed to read {:?}", path))?;
    parse_json_form(&contents).with_context(|| format!("invalid problem file {:?}", path))
}

pub fn write_json_form<P: AsRef<Path>>(path: P, form: &ProblemForm) -> Result<()> {
    write_json_file(path.as_ref(), form)
}

pub fn write_result<P: AsRef<Path>>(path: P, result: &SolveResult) -> Result<()> {
    write_json_file(path.as_ref(), result)
}

fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create parent directory {:?}", parent))?;
        }
    }
    let file = File::create(path).with_context(|| format!("failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).context("failed to serialise JSON")?;
    writer
        .flush()
        .with_context(|| format!("failed to write JSON into {:?}", path))?;
    Ok(())
}

/// Pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value).context("failed to serialise JSON")?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpstudio_core::problem::{Direction, Relation};

    #[test]
    fn example_parses() {
        let form = example_form().unwrap();
        assert_eq!(form.direction, Direction::Maximize);
        assert_eq!(form.variable_count(), 2);
        assert_eq!(form.constraints[1].relation, Relation::LessOrEqual);
    }

    #[test]
    fn recognises_a_result_file() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &SolveResult::infeasible()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let err = parse_json_form(&text).unwrap_err();
        assert!(err.to_string().contains("solve result"));
    }

    #[test]
    fn form_files_round_trip_through_disk() {
        let dir = std::env::temp_dir().join(format!("lpstudio-io-{}", std::process::id()));
        let path = dir.join("nested").join("form.json");
        let form = example_form().unwrap();
        write_json_form(&path, &form).unwrap();
        assert_eq!(read_json_form(&path).unwrap(), form);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn rejects_unknown_relations() {
        let input = r#"{"direction":"minimize","objective":[1.0],"constraints":[{"coefficients":[1.0],"relation":"<","rhs":1.0}]}"#;
        assert!(parse_json_form(input).is_err());
    }
}
