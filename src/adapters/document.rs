use crate::app::display::long_date;
use crate::domain::ports::{DocumentRenderer, PlanReport};
use crate::utils::error::{PlannerError, Result};
use std::fmt::Write;
use std::path::Path;
use std::process::Command;

/// 以 LaTeX 產生餐點計畫文件：摘要表格加上每日一節
#[derive(Debug, Clone, Default)]
pub struct LatexRenderer;

fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

impl DocumentRenderer for LatexRenderer {
    fn extension(&self) -> &'static str {
        "tex"
    }

    fn render(&self, report: &PlanReport<'_>) -> Result<Vec<u8>> {
        let preferences = report.preferences;
        let mut doc = String::new();

        let _ = writeln!(doc, r"\documentclass{{article}}");
        for package in ["graphicx", "float", "paracol"] {
            let _ = writeln!(doc, r"\usepackage{{{}}}", package);
        }
        let _ = writeln!(doc, r"\title{{Meal Plan}}");
        let _ = writeln!(doc, r"\author{{{}}}", escape_latex(&report.profile.name));
        let _ = writeln!(doc, r"\date{{\today}}");
        let _ = writeln!(doc, r"\setlength{{\columnseprule}}{{0.1pt}}");
        let _ = writeln!(doc, r"\begin{{document}}");
        let _ = writeln!(doc, r"\maketitle");

        let summary = [
            ("Meal Type:", preferences.diet_type().to_string()),
            ("Objective:", preferences.objective().to_string()),
            ("Frequency:", preferences.frequency().to_string()),
            (
                "Date Covered:",
                format!(
                    "{} - {}",
                    long_date(preferences.start_date()),
                    long_date(preferences.end_date())
                ),
            ),
            ("Total Costs:", format!("Php {:.2}", report.plan.total_cost as f64)),
        ];
        let _ = writeln!(doc, r"\begin{{table}}[H]");
        let _ = writeln!(doc, r"\begin{{tabular}}{{rl}}");
        for (label, value) in summary {
            let _ = writeln!(doc, r"{} & {} \\", label, escape_latex(&value));
        }
        let _ = writeln!(doc, r"\end{{tabular}}");
        let _ = writeln!(doc, r"\end{{table}}");

        for (date, meals) in report.plan.days() {
            let _ = writeln!(doc, r"\section*{{{}}}", long_date(date));
            let _ = writeln!(doc, r"\begin{{paracol}}[{0}]{{{0}}}", meals.len());
            let _ = writeln!(doc, r"\sloppy");
            for scheduled in meals {
                let _ = writeln!(
                    doc,
                    r"\subsection*{{{}}}",
                    escape_latex(scheduled.meal.display_name())
                );
                let _ = writeln!(doc, r"\textit{{{}}}\newline", escape_latex(&scheduled.meal.main_ingredient));
                let _ = writeln!(doc, r"\newline");
                let _ = writeln!(doc, r"\textbf{{{:.1}}} calories\newline", scheduled.calories as f64);
                let _ = writeln!(doc, r"\textbf{{{:.1}}}g of carbs\newline", scheduled.carbohydrates_g);
                let _ = writeln!(doc, r"\textbf{{{:.1}}}g of protein\newline", scheduled.protein_g);
                let _ = writeln!(doc, r"\textbf{{{:.1}}}g of fats\newline", scheduled.fat_g);
                let _ = writeln!(doc, r"\switchcolumn");
            }
            let _ = writeln!(doc, r"\end{{paracol}}");
        }

        let _ = writeln!(doc, r"\end{{document}}");
        Ok(doc.into_bytes())
    }
}

/// 呼叫外部 LaTeX 編譯器產生 PDF
#[derive(Debug, Clone)]
pub struct PdfCompiler {
    program: String,
}

impl Default for PdfCompiler {
    fn default() -> Self {
        Self::new("pdflatex")
    }
}

impl PdfCompiler {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    pub fn compile(&self, tex_path: &str) -> Result<String> {
        let path = Path::new(tex_path);
        let directory = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        tracing::debug!("Running {} on {}", self.program, tex_path);
        let output = Command::new(&self.program)
            .arg("-interaction=nonstopmode")
            .arg("-output-directory")
            .arg(directory)
            .arg(path)
            .output()
            .map_err(|e| {
                PlannerError::export(
                    "pdf",
                    format!("cannot run {} ({}); make sure the LaTeX compiler is installed", self.program, e),
                )
            })?;

        if !output.status.success() {
            return Err(PlannerError::export(
                "pdf",
                format!("{} exited with {}", self.program, output.status),
            ));
        }

        Ok(path.with_extension("pdf").display().to_string())
    }
}
