use crate::fields::{numeric_field, parse_or_zero};
use egui_plot::{Legend, Line, Plot, PlotPoints};
use pf_core::units::{kg_m3, m, pa, pa_s};
use pf_meter::{sweep_flow_curve, EdgeType, FlowCurve, PlateParameters, PressureSweep, TapType};

/// Desktop shell around the orifice-plate calculator: collects the numeric
/// inputs, builds a fresh `PlateParameters` per update action, and plots the
/// flow curve across the reference driving-pressure sweep.
pub struct PlateflowApp {
    pipe_diameter: String,
    orifice_diameter: String,
    differential_pressure: String,
    fluid_density: String,
    fluid_viscosity: String,
    reynolds_number: String,
    edge_type: EdgeType,
    tap_type: TapType,
    curve: Option<FlowCurve>,
    summary: Option<PlateSummary>,
    error_message: Option<String>,
}

/// Derived quantities shown next to the plot, evaluated at the stored
/// differential pressure.
struct PlateSummary {
    beta: f64,
    area_m2: f64,
    upstream_m: f64,
    downstream_m: f64,
    cd: f64,
    flow_kg_s: f64,
}

impl PlateflowApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            pipe_diameter: String::new(),
            orifice_diameter: String::new(),
            differential_pressure: String::new(),
            fluid_density: String::new(),
            fluid_viscosity: String::new(),
            reynolds_number: String::new(),
            edge_type: EdgeType::Sharp,
            tap_type: TapType::Corner,
            curve: None,
            summary: None,
            error_message: None,
        }
    }

    /// Blank fields default to 0, matching the reference input behavior.
    fn parse_parameters(&self) -> Result<PlateParameters, String> {
        let pipe_diameter = parse_or_zero(&self.pipe_diameter, "Pipe diameter")?;
        let orifice_diameter = parse_or_zero(&self.orifice_diameter, "Orifice diameter")?;
        let differential_pressure =
            parse_or_zero(&self.differential_pressure, "Differential pressure")?;
        let fluid_density = parse_or_zero(&self.fluid_density, "Fluid density")?;
        let fluid_viscosity = parse_or_zero(&self.fluid_viscosity, "Fluid viscosity")?;
        let reynolds_number = parse_or_zero(&self.reynolds_number, "Reynolds number")?;

        Ok(PlateParameters::new(
            m(pipe_diameter),
            m(orifice_diameter),
            pa(differential_pressure),
            kg_m3(fluid_density),
            pa_s(fluid_viscosity),
            reynolds_number,
            self.edge_type,
            self.tap_type,
        ))
    }

    fn update_curve(&mut self) {
        self.error_message = None;
        self.summary = None;

        let plate = match self.parse_parameters() {
            Ok(plate) => plate,
            Err(msg) => {
                self.error_message = Some(msg);
                self.curve = None;
                return;
            }
        };

        let sweep = PressureSweep::around(plate.differential_pressure);
        let curve = sweep_flow_curve(&plate, &sweep);

        if curve.num_successful == 0 {
            if let Some(err) = &curve.last_error {
                self.error_message = Some(err.to_string());
            }
        }

        let taps = plate.tap_locations();
        let summary = plate.diameter_ratio().and_then(|beta| {
            let cd = plate.discharge_coefficient()?;
            let q = plate.flow_rate(plate.differential_pressure)?;
            Ok(PlateSummary {
                beta,
                area_m2: plate.orifice_area().value,
                upstream_m: taps.upstream.value,
                downstream_m: taps.downstream.value,
                cd,
                flow_kg_s: q.value,
            })
        });

        match summary {
            Ok(s) => self.summary = Some(s),
            Err(err) => {
                if self.error_message.is_none() {
                    self.error_message = Some(err.to_string());
                }
            }
        }

        self.curve = Some(curve);
    }

    fn show_inputs(&mut self, ui: &mut egui::Ui) {
        ui.heading("Orifice plate flow meter");
        ui.separator();

        ui.horizontal(|ui| {
            numeric_field(ui, "Pipe diameter [m]:", &mut self.pipe_diameter);
            numeric_field(ui, "Orifice diameter [m]:", &mut self.orifice_diameter);
            numeric_field(
                ui,
                "Differential pressure [Pa]:",
                &mut self.differential_pressure,
            );
        });

        ui.horizontal(|ui| {
            numeric_field(ui, "Fluid density [kg/m³]:", &mut self.fluid_density);
            numeric_field(ui, "Fluid viscosity [Pa·s]:", &mut self.fluid_viscosity);
            numeric_field(ui, "Reynolds number:", &mut self.reynolds_number);
        });

        ui.horizontal(|ui| {
            ui.label("Edge type:");
            egui::ComboBox::from_id_salt("edge_type_selector")
                .selected_text(self.edge_type.label())
                .show_ui(ui, |ui| {
                    for edge in EdgeType::ALL {
                        ui.selectable_value(&mut self.edge_type, edge, edge.label());
                    }
                });

            ui.label("Tap type:");
            egui::ComboBox::from_id_salt("tap_type_selector")
                .selected_text(self.tap_type.label())
                .show_ui(ui, |ui| {
                    for tap in TapType::ALL {
                        ui.selectable_value(&mut self.tap_type, tap, tap.label());
                    }
                });

            if ui.button("Update parameters").clicked() {
                self.update_curve();
            }
        });

        if let Some(msg) = &self.error_message {
            ui.colored_label(egui::Color32::RED, msg);
        }
    }

    fn show_summary(&self, ui: &mut egui::Ui) {
        let Some(summary) = &self.summary else {
            return;
        };

        ui.horizontal(|ui| {
            ui.label(format!("β = {:.4}", summary.beta));
            ui.separator();
            ui.label(format!("Area = {:.4e} m²", summary.area_m2));
            ui.separator();
            ui.label(format!(
                "Taps: {:.4} m / {:.4} m",
                summary.upstream_m, summary.downstream_m
            ));
            ui.separator();
            ui.label(format!("Cd = {:.4}", summary.cd));
            ui.separator();
            ui.label(format!("q(Δp) = {:.4} kg/s", summary.flow_kg_s));
        });
    }

    fn show_plot(&self, ui: &mut egui::Ui) {
        let points = match &self.curve {
            Some(curve) => curve.points(),
            None => {
                ui.label("Enter parameters and press Update to draw the flow curve");
                return;
            }
        };

        if points.is_empty() {
            ui.label("No drawable points; all sweep samples failed");
            return;
        }

        let plot_points: PlotPoints = points.into();
        let line = Line::new(plot_points).name("Flow curve");

        Plot::new("flow_curve_plot")
            .legend(Legend::default())
            .x_axis_label("Differential pressure [Pa]")
            .y_axis_label("Flow rate [kg/s]")
            .show(ui, |plot_ui| {
                plot_ui.line(line);
            });
    }
}

impl eframe::App for PlateflowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("input_panel").show(ctx, |ui| {
            self.show_inputs(ui);
            self.show_summary(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_plot(ui);
        });
    }
}
