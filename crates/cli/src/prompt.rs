//! Line-oriented terminal form. Every question shows its default in brackets
//! and is asked again until the answer parses.

use anyhow::Result;
use lpstudio_core::form::ProblemForm;
use lpstudio_core::options::Limits;
use lpstudio_core::problem::{Direction, Relation};
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("input closed")]
pub struct InputClosed;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    fn ask_line(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim().to_string())
    }

    fn ask_parsed<T>(
        &mut self,
        question: &str,
        default: T,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T> {
        loop {
            let answer = self.ask_line(question)?;
            if answer.is_empty() {
                return Ok(default);
            }
            match parse(&answer) {
                Some(value) => return Ok(value),
                None => writeln!(self.output, "Valor inválido: {answer:?}")?,
            }
        }
    }

    pub fn ask_number(&mut self, question: &str, default: f64) -> Result<f64> {
        let question = format!("{question} [{default}]: ");
        self.ask_parsed(&question, default, parse_number)
    }

    pub fn ask_count(
        &mut self,
        question: &str,
        range: RangeInclusive<usize>,
        default: usize,
    ) -> Result<usize> {
        let question = format!(
            "{question} ({}-{}) [{default}]: ",
            range.start(),
            range.end()
        );
        self.ask_parsed(&question, default, |answer| {
            answer.parse::<usize>().ok().filter(|n| range.contains(n))
        })
    }

    pub fn ask_relation(&mut self, default: Relation) -> Result<Relation> {
        let question = format!("Operador (<=, >=, =) [{default}]: ");
        self.ask_parsed(&question, default, Relation::parse)
    }

    pub fn ask_direction(&mut self, default: Direction) -> Result<Direction> {
        let shown = match default {
            Direction::Maximize => "max",
            Direction::Minimize => "min",
        };
        let question =
            format!("Deseja maximizar ou minimizar a função objetivo? (max/min) [{shown}]: ");
        self.ask_parsed(&question, default, parse_direction)
    }

    /// Single-letter menu answer, lowercased.
    pub fn ask_choice(&mut self, question: &str, choices: &[char]) -> Result<char> {
        loop {
            let answer = self.ask_line(question)?.to_lowercase();
            let mut chars = answer.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if choices.contains(&c) {
                    return Ok(c);
                }
            }
            writeln!(self.output, "Opção inválida: {answer:?}")?;
        }
    }

    /// Walks the whole form, starting from `previous` for the defaults.
    pub fn ask_form(&mut self, limits: &Limits, previous: &ProblemForm) -> Result<ProblemForm> {
        let mut form = previous.clone();
        writeln!(self.output, "Configuração do Problema")?;
        form.direction = self.ask_direction(form.direction)?;
        let nvars = self.ask_count(
            "Número de variáveis de decisão",
            limits.min_variables..=limits.max_variables,
            limits.clamp_variables(form.variable_count()),
        )?;
        form.resize(nvars, form.constraints.len());

        writeln!(self.output, "Função Objetivo")?;
        for (idx, coefficient) in form.objective.iter_mut().enumerate() {
            *coefficient = self.ask_number(&format!("Coeficiente de x{}", idx + 1), *coefficient)?;
        }

        let ncons = self.ask_count(
            "Quantas restrições?",
            limits.min_constraints..=limits.max_constraints,
            limits.clamp_constraints(form.constraints.len()),
        )?;
        form.resize(nvars, ncons);

        for (row, constraint) in form.constraints.iter_mut().enumerate() {
            writeln!(self.output, "Restrição {}", row + 1)?;
            for (idx, coefficient) in constraint.coefficients.iter_mut().enumerate() {
                *coefficient = self.ask_number(
                    &format!("Coeficiente de x{} (restrição {})", idx + 1, row + 1),
                    *coefficient,
                )?;
            }
            constraint.relation = self.ask_relation(constraint.relation)?;
            constraint.rhs = self.ask_number("Valor do lado direito", constraint.rhs)?;
        }
        Ok(form)
    }
}

/// Accepts `2.5` and `2,5`. Non-finite values are refused.
pub fn parse_number(answer: &str) -> Option<f64> {
    let normalized = if answer.contains('.') {
        answer.to_string()
    } else {
        answer.replace(',', ".")
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_direction(answer: &str) -> Option<Direction> {
    match answer.to_lowercase().as_str() {
        "max" | "maximizar" | "maximize" => Some(Direction::Maximize),
        "min" | "minimizar" | "minimize" => Some(Direction::Minimize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn numbers_accept_a_decimal_comma() {
        assert_eq!(parse_number("2,5"), Some(2.5));
        assert_eq!(parse_number("-1.25"), Some(-1.25));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn invalid_answers_are_asked_again() {
        let mut p = prompter("x\n7\n3\n");
        let n = p.ask_count("Quantas restrições?", 1..=5, 1).unwrap();
        assert_eq!(n, 3);
        let transcript = String::from_utf8(p.output.clone()).unwrap();
        assert_eq!(transcript.matches("Valor inválido").count(), 2);
    }

    #[test]
    fn empty_answer_keeps_the_default() {
        let mut p = prompter("\n");
        assert_eq!(p.ask_number("Coeficiente de x1", 4.0).unwrap(), 4.0);
    }

    #[test]
    fn closed_input_is_reported() {
        let mut p = prompter("");
        let err = p.ask_relation(Relation::Equal).unwrap_err();
        assert!(err.is::<InputClosed>());
    }

    #[test]
    fn walks_the_whole_form() {
        let answers = "min\n2\n2\n3\n2\n1\n1\n>=\n2\n1\n-1\n>=\n0\n";
        let mut p = prompter(answers);
        let form = p.ask_form(&Limits::default(), &ProblemForm::default()).unwrap();
        assert_eq!(form.direction, Direction::Minimize);
        assert_eq!(form.objective, vec![2.0, 3.0]);
        assert_eq!(form.constraints.len(), 2);
        assert_eq!(form.constraints[0].coefficients, vec![1.0, 1.0]);
        assert_eq!(form.constraints[0].relation, Relation::GreaterOrEqual);
        assert_eq!(form.constraints[0].rhs, 2.0);
        assert_eq!(form.constraints[1].coefficients, vec![1.0, -1.0]);
        assert_eq!(form.constraints[1].rhs, 0.0);
    }
}
