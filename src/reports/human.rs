//! Human-readable console report formatting

use std::fmt::Write;

use console::style;

use super::{ReportFormatter, ReportPayload};
use crate::core::CircularPath;
use crate::error::LoopError;
use crate::graph::GraphRenderer;
use crate::utils::string::pluralize;

#[derive(Debug, Clone, Copy, Default)]
pub struct HumanFormatter;

impl HumanFormatter {
    pub fn new() -> Self {
        Self
    }

    fn write_chain(output: &mut String, cycle: &CircularPath) -> Result<(), LoopError> {
        let arrow = style("→").dim().to_string();
        let chain: Vec<String> = cycle
            .paths()
            .iter()
            .map(|path| style(path).yellow().to_string())
            .collect();
        writeln!(output, "  {}", chain.join(&format!(" {arrow} ")))?;
        Ok(())
    }
}

impl ReportFormatter for HumanFormatter {
    fn format(&self, payload: &ReportPayload<'_>) -> Result<String, LoopError> {
        let mut output = String::new();

        match payload {
            ReportPayload::Cycle(cycle) => {
                writeln!(
                    output,
                    "{} Circular dependency detected ({} {}):\n",
                    style("🔄").red().bold(),
                    style(cycle.len()).red().bold(),
                    pluralize("module", cycle.len())
                )?;
                Self::write_chain(&mut output, cycle)?;
            }
            ReportPayload::Cycles(cycles) => {
                writeln!(
                    output,
                    "{} Found {} circular {}:",
                    style("🔄").red().bold(),
                    style(cycles.len()).red().bold(),
                    pluralize("dependency", cycles.len())
                )?;
                for (i, cycle) in cycles.iter().enumerate() {
                    writeln!(output, "\n{} Cycle #{}", style("•").dim(), i + 1)?;
                    Self::write_chain(&mut output, cycle)?;
                }
            }
            ReportPayload::Graph(view) => {
                let mut rendered = Vec::new();
                GraphRenderer::new(false).render_ascii(view.graph(), &[], &mut rendered)?;
                output.push_str(&String::from_utf8_lossy(&rendered));
                writeln!(
                    output,
                    "\n{} No circular dependencies reachable from the entry module",
                    style("✅").green().bold()
                )?;
            }
        }

        Ok(output)
    }
}
