#![forbid(unsafe_code)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod state;
mod style;

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use eframe::egui::{self, Margin, RichText, Stroke};
use eframe::{App, CreationContext, Frame, NativeOptions};
use lpstudio_api::{Limits, SolveResult, Status};
use lpstudio_core::format::{coefficient_list, Locale, NumberFormat, PREFERRED_LOCALE};
use lpstudio_core::history::HistoryEntry;
use lpstudio_core::problem::{Direction, Relation};
use lpstudio_io::{
    example_form, read_json_form, write_json_form, write_result, EXAMPLE_DESCRIPTION,
};
use rfd::FileDialog;
use state::Workbench;
use style::{configure_style, section_card, Palette, SectionStyle};

fn main() -> Result<()> {
    install_tracing();

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(1080.0, 760.0)),
        ..Default::default()
    };

    eframe::run_native(
        "LP Studio",
        native_options,
        Box::new(|cc| Box::new(LpStudioApp::new(cc))),
    )?;
    Ok(())
}

fn install_tracing() {
    #[cfg(debug_assertions)]
    {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .try_init()
            .ok();
    }
    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::ERROR)
            .without_time()
            .try_init()
            .ok();
    }
}

#[derive(Clone)]
struct BannerMessage {
    text: String,
    kind: BannerKind,
}

#[derive(Clone, Copy)]
enum BannerKind {
    Info,
    Success,
    Error,
}

impl BannerKind {
    fn colors(self) -> (egui::Color32, egui::Color32) {
        match self {
            BannerKind::Info => Palette::banner_info(),
            BannerKind::Success => Palette::banner_success(),
            BannerKind::Error => Palette::banner_error(),
        }
    }
}

struct LpStudioApp {
    bench: Workbench,
    format: NumberFormat,
    banner: Option<BannerMessage>,
    last_dir: Option<PathBuf>,
}

impl LpStudioApp {
    fn new(cc: &CreationContext<'_>) -> Self {
        configure_style(&cc.egui_ctx);

        let preferred = env::var("LPSTUDIO_LOCALE").unwrap_or_else(|_| PREFERRED_LOCALE.into());
        let format = NumberFormat::new(Locale::resolve(Some(preferred.as_str())));
        tracing::info!(locale = format.locale().name(), "starting LP Studio");

        Self {
            bench: Workbench::new(Limits::default()),
            format,
            banner: Some(BannerMessage {
                text: "Configure o problema na barra lateral e clique em Resolver.".into(),
                kind: BannerKind::Info,
            }),
            last_dir: env::current_dir().ok(),
        }
    }

    fn set_banner(&mut self, kind: BannerKind, message: impl Into<String>) {
        self.banner = Some(BannerMessage {
            text: message.into(),
            kind,
        });
    }

    fn resolve(&mut self) {
        match self.bench.resolve() {
            Ok(result) => {
                let kind = if result.status.is_optimal() {
                    BannerKind::Success
                } else {
                    BannerKind::Info
                };
                let sequence = self.bench.session().history().len();
                self.set_banner(kind, format!("Simulação #{sequence} registrada no histórico."));
            }
            Err(err) => {
                tracing::warn!(error = %err, "problem rejected");
                self.set_banner(BannerKind::Error, format!("Problema inválido: {err}"));
            }
        }
    }

    fn clear_history(&mut self) {
        self.bench.clear_history();
        self.set_banner(BannerKind::Success, "Histórico limpo com sucesso!");
    }

    fn dialog(&self, title: &str) -> FileDialog {
        let mut dialog = FileDialog::new()
            .add_filter("JSON", &["json", "JSON"])
            .set_title(title);
        if let Some(dir) = &self.last_dir {
            dialog = dialog.set_directory(dir);
        }
        dialog
    }

    fn open_form(&mut self) {
        if let Some(path) = self.dialog("Abrir problema").pick_file() {
            self.load_form_file(path);
        }
    }

    fn load_form_file(&mut self, path: PathBuf) {
        self.last_dir = path.parent().map(PathBuf::from);
        let loaded = read_json_form(&path)
            .and_then(|form| self.bench.load(form).map_err(anyhow::Error::from));
        match loaded {
            Ok(()) => self.set_banner(
                BannerKind::Success,
                format!("Problema carregado de {}.", path.display()),
            ),
            Err(err) => self.set_banner(
                BannerKind::Error,
                format!("Não foi possível abrir {}: {err:#}", path.display()),
            ),
        }
    }

    fn save_form(&mut self) {
        let Some(path) = self
            .dialog("Salvar problema")
            .set_file_name("problema.json")
            .save_file()
        else {
            return;
        };
        self.bench.sync();
        match write_json_form(&path, &self.bench.form) {
            Ok(()) => self.set_banner(
                BannerKind::Success,
                format!("Problema salvo em {}.", path.display()),
            ),
            Err(err) => self.set_banner(BannerKind::Error, format!("Falha ao salvar: {err:#}")),
        }
    }

    fn export_result(&mut self) {
        let Some(result) = self.bench.current().cloned() else {
            return;
        };
        let Some(path) = self
            .dialog("Exportar resultado")
            .set_file_name("resultado.json")
            .save_file()
        else {
            return;
        };
        match write_result(&path, &result) {
            Ok(()) => self.set_banner(
                BannerKind::Success,
                format!("Resultado exportado para {}.", path.display()),
            ),
            Err(err) => self.set_banner(BannerKind::Error, format!("Falha ao exportar: {err:#}")),
        }
    }

    fn load_example(&mut self) {
        let loaded = example_form().and_then(|form| self.bench.load(form).map_err(Into::into));
        match loaded {
            Ok(()) => self.set_banner(BannerKind::Success, EXAMPLE_DESCRIPTION),
            Err(err) => self.set_banner(BannerKind::Error, format!("Exemplo inválido: {err:#}")),
        }
    }

    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let dropped: Option<PathBuf> = ctx.input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        });
        if let Some(path) = dropped {
            self.load_form_file(path);
        }
    }

    fn render_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.banner.clone() else {
            return;
        };
        let (fg, bg) = banner.kind.colors();
        egui::Frame::none()
            .fill(bg)
            .rounding(8.0)
            .inner_margin(Margin::symmetric(14.0, 10.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.add(egui::Label::new(RichText::new(&banner.text).color(fg)).wrap(true));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Fechar").clicked() {
                            self.banner = None;
                        }
                    });
                });
            });
    }

    fn render_sidebar(&mut self, ui: &mut egui::Ui) {
        let limits = *self.bench.limits();
        ui.heading("Configuração do Problema");
        ui.add_space(6.0);
        ui.label("Deseja maximizar ou minimizar a função objetivo?");
        for direction in Direction::all() {
            ui.radio_value(&mut self.bench.form.direction, direction, direction.label());
        }
        ui.add_space(6.0);
        ui.label("Número de variáveis de decisão");
        ui.add(egui::Slider::new(
            &mut self.bench.variable_count,
            limits.min_variables..=limits.max_variables,
        ));
        ui.label("Quantas restrições?");
        ui.add(egui::Slider::new(
            &mut self.bench.constraint_count,
            limits.min_constraints..=limits.max_constraints,
        ));
        self.bench.sync();

        ui.separator();
        if ui.button("Abrir problema...").clicked() {
            self.open_form();
        }
        if ui.button("Salvar problema...").clicked() {
            self.save_form();
        }
        if ui
            .button(RichText::new("Usar exemplo").color(Palette::accent_amber()))
            .clicked()
        {
            self.load_example();
        }
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        let mut solve_clicked = false;
        section_card(ui, SectionStyle::form(), |ui| {
            ui.heading("Função Objetivo");
            ui.horizontal_wrapped(|ui| {
                for (idx, coefficient) in self.bench.form.objective.iter_mut().enumerate() {
                    ui.label(format!("x{}", idx + 1));
                    ui.add(egui::DragValue::new(coefficient).speed(0.1));
                }
            });

            ui.add_space(8.0);
            ui.heading("Restrições");
            egui::Grid::new("constraints")
                .num_columns(self.bench.variable_count + 3)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    for (row, constraint) in self.bench.form.constraints.iter_mut().enumerate() {
                        ui.label(format!("Restrição {}", row + 1));
                        for coefficient in constraint.coefficients.iter_mut() {
                            ui.add(egui::DragValue::new(coefficient).speed(0.1));
                        }
                        egui::ComboBox::from_id_source(("relation", row))
                            .selected_text(constraint.relation.symbol())
                            .width(60.0)
                            .show_ui(ui, |ui| {
                                for relation in Relation::all() {
                                    ui.selectable_value(
                                        &mut constraint.relation,
                                        relation,
                                        relation.symbol(),
                                    );
                                }
                            });
                        ui.add(egui::DragValue::new(&mut constraint.rhs).speed(0.1));
                        ui.end_row();
                    }
                });

            ui.add_space(10.0);
            let button = egui::Button::new(RichText::new("Resolver").strong())
                .stroke(Stroke::new(1.0, Palette::accent_teal()))
                .min_size(egui::vec2(140.0, 34.0));
            solve_clicked = ui.add(button).clicked();
        });
        if solve_clicked {
            self.resolve();
        }
    }

    fn render_current(&mut self, ui: &mut egui::Ui) {
        let Some(result) = self.bench.current().cloned() else {
            return;
        };
        let mut export_clicked = false;
        section_card(ui, SectionStyle::result(), |ui| {
            ui.heading("Resultado Atual");
            render_result(ui, &result, &self.format);
            if result.status.is_optimal() {
                ui.add_space(6.0);
                export_clicked = ui.button("Exportar resultado...").clicked();
            }
        });
        if export_clicked {
            self.export_result();
        }
    }

    fn render_history(&mut self, ui: &mut egui::Ui) {
        let mut clear_clicked = false;
        section_card(ui, SectionStyle::history(), |ui| {
            ui.heading("Histórico de Simulações");
            let recent = self.bench.session().recent();
            if recent.is_empty() {
                ui.label(
                    RichText::new("Nenhuma simulação registrada.").color(Palette::text_secondary()),
                );
            }
            for entry in recent {
                render_history_entry(ui, entry, &self.format);
            }
            ui.add_space(6.0);
            clear_clicked = ui.button("Limpar histórico").clicked();
        });
        if clear_clicked {
            self.clear_history();
        }
    }
}

impl App for LpStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.handle_file_drops(ctx);

        egui::TopBottomPanel::top("app_header")
            .frame(egui::Frame::none().fill(Palette::top_panel()))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.heading(RichText::new("LP Studio").color(Palette::accent_teal()));
                    ui.label(
                        RichText::new(
                            "Modelagem de Problemas de Programação Linear com Análise de Sensibilidade",
                        )
                        .color(Palette::text_secondary()),
                    );
                    ui.add_space(6.0);
                });
            });

        egui::SidePanel::left("configuration")
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| self.render_sidebar(ui));

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(Palette::main_panel())
                    .inner_margin(Margin::symmetric(16.0, 8.0)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.add_space(8.0);
                        self.render_banner(ui);
                        self.render_form(ui);
                        self.render_current(ui);
                        self.render_history(ui);
                    });
            });
    }
}

fn render_result(ui: &mut egui::Ui, result: &SolveResult, format: &NumberFormat) {
    match result.status {
        Status::Optimal => {
            ui.colored_label(Palette::status(result.status), "Solução ótima encontrada!");
            if let Some(value) = result.objective_value {
                ui.label(format!(
                    "Valor ótimo da função objetivo: {}",
                    format.currency(value)
                ));
            }
            ui.label("Valores das variáveis de decisão:");
            for (name, value) in &result.variable_values {
                ui.label(format!("  {name} = {}", format.currency(*value)));
            }
            if let Some(sensitivity) = &result.sensitivity {
                ui.add_space(6.0);
                ui.label(RichText::new("Análise de Sensibilidade").strong());
                egui::Grid::new("sensitivity")
                    .striped(true)
                    .num_columns(3)
                    .show(ui, |ui| {
                        ui.label("Restrição");
                        ui.label("Preço-sombra");
                        ui.label("Folga");
                        ui.end_row();
                        for (label, entry) in sensitivity {
                            ui.label(label);
                            ui.label(format.currency(entry.shadow_price));
                            ui.label(format.fixed4(entry.slack));
                            ui.end_row();
                        }
                    });
            }
        }
        Status::Infeasible => {
            ui.colored_label(
                Palette::status(result.status),
                "❌ As restrições fornecidas resultam em um problema inviável. Verifique se há contradições.",
            );
        }
        other => {
            ui.colored_label(
                Palette::status(other),
                format!("Status da solução: {other}. Pode não ter sido possível resolver o problema."),
            );
        }
    }
}

fn render_history_entry(ui: &mut egui::Ui, entry: &HistoryEntry, format: &NumberFormat) {
    let result = entry.result();
    egui::CollapsingHeader::new(format!(
        "Simulação #{} ({})",
        entry.sequence(),
        entry.clock_time()
    ))
    .id_source(("history", entry.sequence()))
    .default_open(false)
    .show(ui, |ui| {
        ui.label(format!("Tipo: {}", entry.direction()));
        ui.label(format!("Coeficientes FO: {}", coefficient_list(entry.objective())));
        ui.colored_label(
            Palette::status(result.status),
            format!("Status: {}", result.status),
        );
        if let (Status::Optimal, Some(value)) = (result.status, result.objective_value) {
            ui.label(format!("Valor ótimo: {}", format.currency(value)));
            for (name, value) in &result.variable_values {
                ui.label(format!("{name} = {}", format.currency(*value)));
            }
        }
    });
}
