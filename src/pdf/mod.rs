//! Single-page PDF document generation.
//!
//! `layout` provides the cursor-based page composer; `labels` holds the
//! pure renderers for box content labels and the non-ADR declaration.

pub mod labels;
pub mod layout;

pub use labels::{
    render_non_adr_declaration, render_outbound_content_label, render_sample_content_label,
    ContractInfo, GeneratedDocument, KitItemLine, LabelOptions, NonAdrDeclarationData,
    OutboundContentLabelData, SampleContentLabelData,
};
