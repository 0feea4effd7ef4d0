use crate::error::{MetoceanError, MetoceanResult};
use crate::models::{Axis, ScatterFilter, ScatterRequest, ScatterTable};
use crate::preprocessing::{DiscreteColumn, MetoceanData};

/// Most filters a single table may carry.
pub const MAX_FILTERS: usize = 2;

/// Build one scatter table.
///
/// Probabilities are joint counts over the total (unfiltered) row count, so
/// a filtered table sums to the share of rows passing the filters. Empty
/// cells are `NaN`. A filter value that matches no axis label yields an
/// all-`NaN` table.
pub fn build_scatter(data: &MetoceanData, request: &ScatterRequest) -> MetoceanResult<ScatterTable> {
    if request.filters.len() > MAX_FILTERS {
        return Err(MetoceanError::Precondition(format!(
            "A scatter table takes at most {} filters, got {}",
            MAX_FILTERS,
            request.filters.len()
        )));
    }

    let x = data.discrete(request.x)?;
    let y = data.discrete(request.y)?;
    let filters: Vec<ScatterFilter> = request.active_filters().copied().collect();

    let mut values = vec![vec![f64::NAN; x.scale.len()]; y.scale.len()];
    if let Some(resolved) = resolve_filters(data, &filters)? {
        let counts = count_pairs(x, y, &resolved, data.height());
        let total = data.height() as f64;
        for (row, counts) in values.iter_mut().zip(counts) {
            for (cell, count) in row.iter_mut().zip(counts) {
                if count > 0 {
                    *cell = count as f64 / total;
                }
            }
        }
    } else {
        log::debug!("No axis label matches the filters of '{}'", request.header());
    }

    Ok(ScatterTable {
        x: Axis::new(request.x, &x.scale),
        y: Axis::new(request.y, &y.scale),
        filters,
        header: request.header(),
        values,
    })
}

/// Resolve filter labels to axis positions; `None` when any label is unknown.
fn resolve_filters<'a>(
    data: &'a MetoceanData,
    filters: &[ScatterFilter],
) -> MetoceanResult<Option<Vec<(&'a DiscreteColumn, u32)>>> {
    let mut resolved = Vec::with_capacity(filters.len());
    for filter in filters {
        let column = data.discrete(filter.variable)?;
        match column.scale.position_of(filter.value) {
            Some(position) => resolved.push((column, position)),
            None => return Ok(None),
        }
    }
    Ok(Some(resolved))
}

/// Count rows per `(y, x)` position in a single pass.
fn count_pairs(
    x: &DiscreteColumn,
    y: &DiscreteColumn,
    filters: &[(&DiscreteColumn, u32)],
    height: usize,
) -> Vec<Vec<usize>> {
    let mut counts = vec![vec![0usize; x.scale.len()]; y.scale.len()];
    for row in 0..height {
        if !filters
            .iter()
            .all(|(column, position)| column.codes[row] == Some(*position))
        {
            continue;
        }
        if let (Some(xi), Some(yi)) = (x.codes[row], y.codes[row]) {
            counts[yi as usize][xi as usize] += 1;
        }
    }
    counts
}
