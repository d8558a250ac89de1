use crate::app::display::Palette;
use crate::core::Questionnaire;
use crate::utils::error::{PlannerError, Result};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::io::{BufRead, Write};
use strum::VariantArray;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// 逐行讀取輸入的終端機問卷；輸入無效時重新詢問
pub struct TerminalQuestionnaire<R: BufRead, W: Write> {
    input: R,
    output: W,
    palette: Palette,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> TerminalQuestionnaire<R, W> {
    pub fn new(input: R, output: W, palette: Palette, today: NaiveDate) -> Self {
        Self {
            input,
            output,
            palette,
            today,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self) -> Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PlannerError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn invalid(&mut self) -> Result<()> {
        writeln!(self.output, "{}", self.palette.fail("Invalid input.  Please try again."))?;
        Ok(())
    }

    fn print_choices(&mut self, labels: &[String]) -> Result<()> {
        if labels.len() <= 4 {
            let line = labels
                .iter()
                .enumerate()
                .map(|(i, label)| format!("{} {}", self.palette.ok(&format!("[{}]", i + 1)), label))
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(self.output, "{}", line)?;
        } else {
            // 超過四個選項時分兩欄
            let rows = labels.len().div_ceil(2);
            for i in 0..rows {
                let left = format!("{} {:<20}", self.palette.ok(&format!("[{}]", i + 1)), labels[i]);
                match labels.get(i + rows) {
                    Some(right) => writeln!(
                        self.output,
                        "{} {} {}",
                        left,
                        self.palette.ok(&format!("[{}]", i + 1 + rows)),
                        right
                    )?,
                    None => writeln!(self.output, "{}", left.trim_end())?,
                }
            }
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Questionnaire for TerminalQuestionnaire<R, W> {
    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn ask_text(&mut self, question: &str) -> Result<String> {
        writeln!(self.output, "{}", question)?;
        loop {
            let answer = self.read_answer()?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.invalid()?;
        }
    }

    fn ask_number(&mut self, question: &str) -> Result<u32> {
        writeln!(self.output, "{}", question)?;
        loop {
            match self.read_answer()?.parse::<u32>() {
                Ok(number) => return Ok(number),
                Err(_) => self.invalid()?,
            }
        }
    }

    fn ask_choice(&mut self, question: &str, labels: &[String]) -> Result<usize> {
        writeln!(self.output, "{}", question)?;
        self.print_choices(labels)?;

        loop {
            write!(self.output, "{}", self.palette.muted("Type the number of your choice: "))?;
            let answer = self.read_answer()?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=labels.len()).contains(&n) => {
                    writeln!(self.output, "{}", self.palette.ok(&labels[n - 1]))?;
                    return Ok(n - 1);
                }
                _ => self.invalid()?,
            }
        }
    }

    fn ask_multi_choice(&mut self, question: &str, labels: &[String]) -> Result<Vec<usize>> {
        writeln!(self.output, "{}", question)?;
        self.print_choices(labels)?;

        loop {
            write!(
                self.output,
                "{}",
                self.palette
                    .muted("Type the numbers of your choices, separated by commas: ")
            )?;
            let answer = self.read_answer()?;
            if answer.is_empty() {
                writeln!(self.output, "{}", self.palette.ok("Selected choices: none"))?;
                return Ok(Vec::new());
            }

            let parsed: Option<BTreeSet<usize>> = answer
                .split(',')
                .map(|part| match part.trim().parse::<usize>() {
                    Ok(n) if (1..=labels.len()).contains(&n) => Some(n - 1),
                    _ => None,
                })
                .collect();

            match parsed {
                Some(indices) => {
                    let selected: Vec<&str> = indices.iter().map(|&i| labels[i].as_str()).collect();
                    writeln!(
                        self.output,
                        "{}",
                        self.palette
                            .ok(&format!("Selected choices: {}", selected.join(", ")))
                    )?;
                    return Ok(indices.into_iter().collect());
                }
                None => self.invalid()?,
            }
        }
    }

    fn ask_date(&mut self, question: &str, future_only: bool) -> Result<NaiveDate> {
        let months: Vec<String> = MONTHS.iter().map(|m| m.to_string()).collect();

        loop {
            writeln!(self.output, "{}", question)?;
            let month = self.ask_choice("Enter the month", &months)? as u32 + 1;
            let day = self.ask_number("Enter the day")?;

            match NaiveDate::from_ymd_opt(self.today.year(), month, day) {
                Some(date) if !future_only || date > self.today => return Ok(date),
                _ => {
                    writeln!(
                        self.output,
                        "{}",
                        self.palette
                            .fail("Invalid date or date must be in the future.  Please try again.")
                    )?;
                }
            }
        }
    }
}

/// 以 enum 的顯示名稱作為選項
pub fn ask_enum<T, Q>(questionnaire: &mut Q, question: &str) -> Result<T>
where
    T: VariantArray + Display + Copy,
    Q: Questionnaire + ?Sized,
{
    let labels: Vec<String> = T::VARIANTS.iter().map(|v| v.to_string()).collect();
    let index = questionnaire.ask_choice(question, &labels)?;
    Ok(T::VARIANTS[index])
}

pub fn ask_enum_set<T, Q>(questionnaire: &mut Q, question: &str) -> Result<Vec<T>>
where
    T: VariantArray + Display + Copy,
    Q: Questionnaire + ?Sized,
{
    let labels: Vec<String> = T::VARIANTS.iter().map(|v| v.to_string()).collect();
    let indices = questionnaire.ask_multi_choice(question, &labels)?;
    Ok(indices.into_iter().map(|i| T::VARIANTS[i]).collect())
}

pub fn ask_yes_no<Q: Questionnaire + ?Sized>(questionnaire: &mut Q, question: &str) -> Result<bool> {
    let labels = vec!["Yes".to_string(), "No".to_string()];
    Ok(questionnaire.ask_choice(question, &labels)? == 0)
}
