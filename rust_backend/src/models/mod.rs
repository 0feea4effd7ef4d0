//! Table structures produced by the engine.
//!
//! Tables carry their axes and values only; layout and styling belong to the
//! renderer that consumes the JSON hand-off.

pub mod axis;
pub mod nss;
pub mod report;
pub mod scatter;

pub use axis::{Axis, Scale};
pub use nss::{NssCell, NssTable, NssTables};
pub use report::{
    BinBoundsTable, NssBlock, NssReport, NssSheet, ScatterReport, ScatterSheet, Workbook,
};
pub use scatter::{ScatterFilter, ScatterRequest, ScatterTable};
