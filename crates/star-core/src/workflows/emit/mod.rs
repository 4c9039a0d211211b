//! NMR-STAR saveframe, loop, and row emission.
//!
//! Everything here is driven by the static schema tables in
//! [`crate::core::tables::schema`]: row width, tag order, float-cell
//! positions, and per-cell validation policy are all derived from the
//! [`LoopSchema`](crate::core::tables::schema::LoopSchema) of the content
//! subtype being emitted, never hard-coded.

pub mod atom_map;
pub mod counter;
pub mod row;
pub mod saveframe;
pub mod value;

pub use atom_map::{MAX_ALLOWED_EXT_SEQ, MAX_OFFSET_ATTEMPT, OffsetHolder, StarAtom, star_atom};
pub use counter::ListIdCounter;
pub use row::{RowAtom, RowContext, RowKeys, build_row};
pub use saveframe::{AlignCenter, Saveframe, SaveframeInputs, StarLoop, build_saveframe};
pub use value::{MISSING, RowDisposition, validate_row};
