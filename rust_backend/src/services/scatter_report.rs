use std::time::Instant;

use rayon::prelude::*;

use super::scatter::build_scatter;
use crate::core::{SeaComponent, Variable, WindLevel};
use crate::error::{MetoceanError, MetoceanResult};
use crate::models::{ScatterReport, ScatterRequest, ScatterSheet, ScatterTable};
use crate::preprocessing::MetoceanData;

/// Requests of one worksheet, laid out as rows of tables.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    pub name: String,
    pub rows: Vec<Vec<ScatterRequest>>,
}

impl SheetPlan {
    fn new(name: impl Into<String>, rows: Vec<Vec<ScatterRequest>>) -> Self {
        SheetPlan {
            name: name.into(),
            rows,
        }
    }

    pub fn table_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// Misalignment grid of `x` vs `y`: omni, per wave sector, per wind sector,
/// then one row per wind sector across the wave sectors.
fn misalignment_grid(
    x: Variable,
    y: Variable,
    (wind_direction, wind_sectors): (Variable, u32),
    (wave_direction, wave_sectors): (Variable, u32),
) -> Vec<Vec<ScatterRequest>> {
    let base = ScatterRequest::new(x, y);
    let mut rows = vec![vec![base.clone()]];
    rows.push(
        (1..=wave_sectors)
            .map(|v| base.clone().filtered(wave_direction, f64::from(v)))
            .collect(),
    );
    rows.push(
        (1..=wind_sectors)
            .map(|w| base.clone().filtered(wind_direction, f64::from(w)))
            .collect(),
    );
    for w in 1..=wind_sectors {
        rows.push(
            (1..=wave_sectors)
                .map(|v| {
                    base.clone()
                        .filtered(wind_direction, f64::from(w))
                        .filtered(wave_direction, f64::from(v))
                })
                .collect(),
        );
    }
    rows
}

/// Sheets to build for a dataset, in workbook order.
///
/// Sheets whose inputs are disabled are left out.
pub fn scatter_catalogue(data: &MetoceanData) -> MetoceanResult<Vec<SheetPlan>> {
    let config = data.config();
    let mut sheets = Vec::new();

    let levels: Vec<WindLevel> = match &config.wind {
        Some(wind) if wind.ten_metre => vec![WindLevel::HubHeight, WindLevel::TenMetre],
        Some(_) => vec![WindLevel::HubHeight],
        None => Vec::new(),
    };
    let components: Vec<SeaComponent> = match &config.wave {
        Some(wave) if wave.spectral => {
            vec![SeaComponent::Total, SeaComponent::Swell, SeaComponent::WindSea]
        }
        Some(_) => vec![SeaComponent::Total],
        None => Vec::new(),
    };

    for level in &levels {
        sheets.push(SheetPlan::new(
            format!("WndSpd-WndDir ({})", level.tag()),
            vec![vec![ScatterRequest::new(level.direction(), level.speed())]],
        ));
    }

    if !components.is_empty() {
        sheets.push(SheetPlan::new(
            "Hs-WaveDir",
            vec![components
                .iter()
                .map(|c| ScatterRequest::new(c.direction(), c.hs()))
                .collect()],
        ));
    }

    if let (Some(wind), Some(wave)) = (&config.wind, &config.wave) {
        for level in &levels {
            sheets.push(SheetPlan::new(
                format!("Hs-WindDir ({})", level.tag()),
                vec![components
                    .iter()
                    .map(|c| ScatterRequest::new(level.direction(), c.hs()))
                    .collect()],
            ));
        }

        for level in &levels {
            for component in &components {
                sheets.push(SheetPlan::new(
                    format!("WndSpd ({})-Hs ({})", level.tag(), component.label()),
                    misalignment_grid(
                        component.hs(),
                        level.speed(),
                        (level.direction(), wind.sectors),
                        (component.direction(), wave.sectors),
                    ),
                ));
            }
        }

        for level in &levels {
            for component in &components {
                sheets.push(SheetPlan::new(
                    format!("Hs-Tp ({}) (Wind {})", component.label(), level.tag()),
                    misalignment_grid(
                        component.tp(),
                        component.hs(),
                        (level.direction(), wind.sectors),
                        (component.direction(), wave.sectors),
                    ),
                ));
            }
        }

        for level in &levels {
            sheets.push(SheetPlan::new(
                format!("WindDir-WaveDir ({})", level.tag()),
                vec![components
                    .iter()
                    .map(|c| ScatterRequest::new(c.direction(), level.direction()))
                    .collect()],
            ));
        }

        for level in &levels {
            let name = match level {
                WindLevel::HubHeight => "WindDir-WaveDir by WndSpd (@HH)",
                WindLevel::TenMetre => "WindDir-WaveDir by WndSpd(@10m)",
            };
            let centers = data.bins().centers(level.speed())?;
            let rows = centers
                .iter()
                .map(|center| {
                    components
                        .iter()
                        .map(|c| {
                            ScatterRequest::new(c.direction(), level.direction())
                                .filtered(level.speed(), *center)
                        })
                        .collect()
                })
                .collect();
            sheets.push(SheetPlan::new(name, rows));
        }
    }

    if let Some(current) = &config.current {
        let mut groups = vec![(
            Variable::SurfaceCurrent,
            Variable::DepthAveragedCurrent,
            Variable::CurrentDirection,
        )];
        if current.components {
            groups.push((
                Variable::SurfaceCurrentTidal,
                Variable::DepthAveragedCurrentTidal,
                Variable::CurrentDirectionTidal,
            ));
            groups.push((
                Variable::SurfaceCurrentResidual,
                Variable::DepthAveragedCurrentResidual,
                Variable::CurrentDirectionResidual,
            ));
        }
        sheets.push(SheetPlan::new(
            "Srfc CurrentSpd-CurrentDir",
            vec![groups
                .iter()
                .map(|(surface, _, direction)| ScatterRequest::new(*direction, *surface))
                .collect()],
        ));
        sheets.push(SheetPlan::new(
            "DpthAvg CurrentSpd-CurrentDir",
            vec![groups
                .iter()
                .map(|(_, depth_averaged, direction)| {
                    ScatterRequest::new(*direction, *depth_averaged)
                })
                .collect()],
        ));
    }

    sheets.retain(|s| s.table_count() > 0);
    Ok(sheets)
}

/// Build every sheet of the catalogue.
///
/// Tables are independent and built in parallel; sheet, row and table order
/// follow the catalogue.
pub fn build_scatter_report(data: &MetoceanData) -> MetoceanResult<ScatterReport> {
    let config = data.config();
    if !config.scatter_report {
        return Err(MetoceanError::Precondition(
            "Scatter report is disabled in the configuration".to_string(),
        ));
    }
    let start = Instant::now();
    let catalogue = scatter_catalogue(data)?;

    let sheets: Vec<ScatterSheet> = catalogue
        .par_iter()
        .map(|plan| -> MetoceanResult<ScatterSheet> {
            let rows = plan
                .rows
                .par_iter()
                .map(|row| {
                    row.par_iter()
                        .map(|request| build_scatter(data, request))
                        .collect::<MetoceanResult<Vec<ScatterTable>>>()
                })
                .collect::<MetoceanResult<Vec<_>>>()?;
            Ok(ScatterSheet {
                name: plan.name.clone(),
                rows,
            })
        })
        .collect::<MetoceanResult<_>>()?;

    let report = ScatterReport {
        project: config.project.clone(),
        workbook: config.scatter_workbook_name(),
        sheets,
    };
    log::info!(
        "Built {} scatter tables on {} sheets in {:.2?}",
        report.table_count(),
        report.sheets.len(),
        start.elapsed()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CurrentSettings, ReportConfig, WaveSettings, WindSettings};
    use crate::core::ObservationSet;

    fn observations(spectral: bool) -> ObservationSet {
        let mut columns = vec![
            (Variable::WindSpeed, vec![1.0, 2.0, 6.0, 7.0]),
            (Variable::WindDirection, vec![10.0, 100.0, 190.0, 280.0]),
            (Variable::WindSpeed10m, vec![0.5, 1.5, 4.0, 5.5]),
            (Variable::WindDirection10m, vec![10.0, 100.0, 190.0, 280.0]),
            (Variable::Hs, vec![0.5, 1.0, 1.5, 2.0]),
            (Variable::WaveDirection, vec![10.0, 10.0, 190.0, 190.0]),
            (Variable::Tp, vec![5.0, 6.0, 7.0, 8.0]),
            (Variable::Tz, vec![4.0, 4.0, 5.0, 5.0]),
            (Variable::SurfaceCurrent, vec![0.1, 0.2, 0.3, 0.4]),
            (Variable::DepthAveragedCurrent, vec![0.1, 0.1, 0.2, 0.2]),
            (Variable::CurrentDirection, vec![0.0, 90.0, 180.0, 270.0]),
        ];
        if spectral {
            for component in [SeaComponent::WindSea, SeaComponent::Swell] {
                columns.push((component.hs(), vec![0.3, 0.6, 0.9, 1.2]));
                columns.push((component.direction(), vec![10.0, 190.0, 10.0, 190.0]));
                columns.push((component.tp(), vec![3.0, 4.0, 5.0, 6.0]));
                columns.push((component.tz(), vec![2.0, 3.0, 4.0, 5.0]));
            }
        }
        ObservationSet::with_hourly_index(columns).unwrap()
    }

    fn data(spectral: bool) -> MetoceanData {
        let mut wind = WindSettings::new(5.0, 4);
        wind.ten_metre = true;
        let mut wave = WaveSettings::new(1.0, 1.0, 2);
        wave.spectral = spectral;
        let config = ReportConfig::new("Catalogue")
            .with_wind(wind)
            .with_wave(wave)
            .with_current(CurrentSettings::new(0.1, 4));
        MetoceanData::new(config, observations(spectral)).unwrap()
    }

    #[test]
    fn test_catalogue_sheet_order() {
        let names: Vec<String> = scatter_catalogue(&data(false))
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "WndSpd-WndDir (@HH)",
                "WndSpd-WndDir (@10m)",
                "Hs-WaveDir",
                "Hs-WindDir (@HH)",
                "Hs-WindDir (@10m)",
                "WndSpd (@HH)-Hs (Totalsea)",
                "WndSpd (@10m)-Hs (Totalsea)",
                "Hs-Tp (Totalsea) (Wind @HH)",
                "Hs-Tp (Totalsea) (Wind @10m)",
                "WindDir-WaveDir (@HH)",
                "WindDir-WaveDir (@10m)",
                "WindDir-WaveDir by WndSpd (@HH)",
                "WindDir-WaveDir by WndSpd(@10m)",
                "Srfc CurrentSpd-CurrentDir",
                "DpthAvg CurrentSpd-CurrentDir",
            ]
        );
    }

    #[test]
    fn test_misalignment_grid_filters() {
        let rows = misalignment_grid(
            Variable::Hs,
            Variable::WindSpeed,
            (Variable::WindDirection, 4),
            (Variable::WaveDirection, 2),
        );
        assert_eq!(rows.len(), 3 + 4);
        assert_eq!(rows[1].len(), 2);
        assert_eq!(rows[2].len(), 4);

        let last = &rows[6][1];
        assert_eq!(last.filters[0].variable, Variable::WindDirection);
        assert_eq!(last.filters[0].value, 4.0);
        assert_eq!(last.filters[1].variable, Variable::WaveDirection);
        assert_eq!(last.filters[1].value, 2.0);
    }

    #[test]
    fn test_by_speed_sheet_uses_level_bins() {
        let catalogue = scatter_catalogue(&data(false)).unwrap();
        let hub = catalogue
            .iter()
            .find(|s| s.name == "WindDir-WaveDir by WndSpd (@HH)")
            .unwrap();
        let ten = catalogue
            .iter()
            .find(|s| s.name == "WindDir-WaveDir by WndSpd(@10m)")
            .unwrap();
        // hub height speeds reach 7 m/s (two bins), 10 m speeds 5.5 m/s (two bins)
        assert_eq!(hub.rows.len(), 2);
        assert_eq!(ten.rows[1][0].filters[0].variable, Variable::WindSpeed10m);
        assert_eq!(ten.rows[1][0].filters[0].value, 7.5);
    }

    #[test]
    fn test_spectral_catalogue() {
        let catalogue = scatter_catalogue(&data(true)).unwrap();
        let hs_wave = catalogue.iter().find(|s| s.name == "Hs-WaveDir").unwrap();
        let axes: Vec<Variable> = hs_wave.rows[0].iter().map(|r| r.y).collect();
        assert_eq!(axes, vec![Variable::Hs, Variable::HsSwell, Variable::HsWind]);
        assert!(catalogue
            .iter()
            .any(|s| s.name == "Hs-Tp (Windsea) (Wind @10m)"));
        assert_eq!(catalogue.len(), 15 + 8);
    }

    #[test]
    fn test_report_tables_are_complete() {
        let data = data(true);
        let report = build_scatter_report(&data).unwrap();
        assert_eq!(report.workbook, "Catalogue_Metocean_Scatter_Tables.xlsx");

        let expected: usize = scatter_catalogue(&data)
            .unwrap()
            .iter()
            .map(SheetPlan::table_count)
            .sum();
        assert_eq!(report.table_count(), expected);

        let sheet = report.sheet("WndSpd-WndDir (@HH)").unwrap();
        let table = &sheet.rows[0][0];
        assert!((table.grand_total() - 1.0).abs() < 1e-12);
    }
}
