use lpstudio_core::format::{coefficient_list, NumberFormat};
use lpstudio_core::history::HistoryEntry;
use lpstudio_core::solution::{SolveResult, Status};
use std::io::{self, Write};

pub fn render_result<W: Write>(out: &mut W, result: &SolveResult, fmt: &NumberFormat) -> io::Result<()> {
    writeln!(out, "Resultado Atual")?;
    match result.status {
        Status::Optimal => {
            writeln!(out, "Solução ótima encontrada!")?;
            if let Some(value) = result.objective_value {
                writeln!(out, "Valor ótimo da função objetivo: {}", fmt.currency(value))?;
            }
            writeln!(out, "Valores das variáveis de decisão:")?;
            for (name, value) in &result.variable_values {
                writeln!(out, "  - {name} = {}", fmt.currency(*value))?;
            }
            if let Some(sensitivity) = &result.sensitivity {
                writeln!(out)?;
                writeln!(out, "Análise de Sensibilidade")?;
                for (label, entry) in sensitivity {
                    writeln!(
                        out,
                        "  - {label} → Preço-sombra: {} | Folga: {}",
                        fmt.currency(entry.shadow_price),
                        fmt.fixed4(entry.slack)
                    )?;
                }
            }
        }
        Status::Infeasible => {
            writeln!(
                out,
                "❌ As restrições fornecidas resultam em um problema inviável. Verifique se há contradições."
            )?;
        }
        other => {
            writeln!(
                out,
                "Status da solução: {other}. Pode não ter sido possível resolver o problema."
            )?;
        }
    }
    Ok(())
}

pub fn render_history<W: Write>(
    out: &mut W,
    entries: &[&HistoryEntry],
    fmt: &NumberFormat,
) -> io::Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    writeln!(out, "Histórico de Simulações")?;
    for entry in entries {
        let result = entry.result();
        writeln!(out, "Simulação #{} ({})", entry.sequence(), entry.clock_time())?;
        writeln!(out, "    Tipo: {}", entry.direction())?;
        writeln!(out, "    Coeficientes FO: {}", coefficient_list(entry.objective()))?;
        writeln!(out, "    Status: {}", result.status)?;
        if let (Status::Optimal, Some(value)) = (result.status, result.objective_value) {
            writeln!(out, "    Valor ótimo: {}", fmt.currency(value))?;
            for (name, value) in &result.variable_values {
                writeln!(out, "    {name} = {}", fmt.currency(*value))?;
            }
        }
    }
    Ok(())
}
