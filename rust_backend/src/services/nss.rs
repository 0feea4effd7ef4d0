use std::time::Instant;

use rayon::prelude::*;

use crate::config::{Capability, Reducer};
use crate::core::{SeaComponent, Variable};
use crate::error::{MetoceanError, MetoceanResult};
use crate::models::{BinBoundsTable, NssCell, NssReport, NssSheet, NssTable, NssTables};
use crate::preprocessing::MetoceanData;

/// Whether the configuration asks for an NSS report and has the inputs for it.
pub fn nss_applicable(data: &MetoceanData) -> bool {
    data.capabilities()
        .contains_all(&[Capability::NssReport, Capability::Wind, Capability::Wave])
}

/// Build the NSS grids of every available sea component.
///
/// Wind-sea and swell grids are only built for spectral wave data.
pub fn build_nss_tables(data: &MetoceanData) -> MetoceanResult<NssTables> {
    let capabilities = data.capabilities();
    if !capabilities.contains_all(&[Capability::Wind, Capability::Wave]) {
        return Err(MetoceanError::Precondition(
            "NSS tables need both wind and wave data".to_string(),
        ));
    }
    let start = Instant::now();

    let total = tabulate(data, SeaComponent::Total, true)?;
    let (wind, swell) = if capabilities.contains(Capability::WaveSpectral) {
        (
            Some(tabulate(data, SeaComponent::WindSea, true)?),
            Some(tabulate(data, SeaComponent::Swell, false)?),
        )
    } else {
        (None, None)
    };

    log::info!(
        "Built NSS tables ({} wind sectors x {} wave sectors x {} speed bins) in {:.2?}",
        total.wind_sectors(),
        total.wave_sectors(),
        total.speed_bins(),
        start.elapsed()
    );
    Ok(NssTables { total, wind, swell })
}

/// Build the NSS workbook content.
pub fn build_nss_report(data: &MetoceanData) -> MetoceanResult<NssReport> {
    let tables = build_nss_tables(data)?;
    let config = data.config();
    let speed_scale = data
        .bins()
        .scale(Variable::WindSpeed)
        .ok_or(MetoceanError::MissingColumn(Variable::WindSpeed))?;

    let title = match config.wind.as_ref().and_then(|w| w.hub_height) {
        Some(height) => format!("Hourly Mean WS at {}mMSL [m/s]", height),
        None => "Hourly Mean WS at Hub Height [m/s]".to_string(),
    };

    Ok(NssReport {
        project: config.project.clone(),
        workbook: config.nss_workbook_name(),
        speed_bins: BinBoundsTable::new(title, speed_scale),
        sheets: tables.iter().map(NssSheet::from_table).collect(),
    })
}

/// Cross-tabulate one sea component.
///
/// Rows are grouped in one pass: each row lands in the omni cell, its wind
/// sector cell, its wave sector cell and their intersection. Cells are then
/// reduced independently.
fn tabulate(
    data: &MetoceanData,
    component: SeaComponent,
    by_wind_sector: bool,
) -> MetoceanResult<NssTable> {
    let speed = data.discrete(Variable::WindSpeed)?;
    let wind_direction = data.discrete(Variable::WindDirection)?;
    let wave_direction = data.discrete(component.direction())?;

    let hs = data.column(component.hs())?;
    let tp = data.column(component.tp())?;
    let gamma = data.column(component.gamma()).ok();

    let speed_bins = speed.scale.len();
    let wind_sectors = if by_wind_sector {
        wind_direction.scale.len()
    } else {
        0
    };
    let wave_sectors = wave_direction.scale.len();

    let cell_index =
        |w: usize, v: usize, s: usize| (w * (wave_sectors + 1) + v) * speed_bins + s;
    let mut groups: Vec<Vec<usize>> =
        vec![Vec::new(); (wind_sectors + 1) * (wave_sectors + 1) * speed_bins];

    for row in 0..data.height() {
        let Some(s) = speed.codes[row] else {
            continue;
        };
        let s = s as usize;
        let w = if by_wind_sector {
            wind_direction.codes[row].map(|c| c as usize + 1)
        } else {
            None
        };
        let v = wave_direction.codes[row].map(|c| c as usize + 1);

        groups[cell_index(0, 0, s)].push(row);
        if let Some(w) = w {
            groups[cell_index(w, 0, s)].push(row);
        }
        if let Some(v) = v {
            groups[cell_index(0, v, s)].push(row);
        }
        if let (Some(w), Some(v)) = (w, v) {
            groups[cell_index(w, v, s)].push(row);
        }
    }

    let method = data.config().method;
    let total = data.height() as f64;
    let cells: Vec<NssCell> = groups
        .par_iter()
        .map(|rows| reduce_cell(rows, hs, tp, gamma, method, total))
        .collect();

    let mut table = NssTable::empty(component, wind_sectors, wave_sectors, speed_bins);
    for (w, wind) in table.cells.iter_mut().enumerate() {
        for (v, wave) in wind.iter_mut().enumerate() {
            for (s, cell) in wave.iter_mut().enumerate() {
                *cell = cells[cell_index(w, v, s)];
            }
        }
    }
    log::debug!("Tabulated {:?} NSS grid", component);
    Ok(table)
}

fn reduce_cell(
    rows: &[usize],
    hs: &[f64],
    tp: &[f64],
    gamma: Option<&[f64]>,
    method: Reducer,
    total: f64,
) -> NssCell {
    if rows.is_empty() {
        return NssCell::EMPTY;
    }
    let pick = |column: &[f64]| -> Vec<f64> { rows.iter().map(|&r| column[r]).collect() };
    NssCell {
        hs: method.reduce(&pick(hs)),
        tp: method.reduce(&pick(tp)),
        gamma: gamma.map_or(f64::NAN, |g| method.reduce(&pick(g))),
        probability: rows.len() as f64 / total,
    }
}
