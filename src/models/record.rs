//! Serialized form of a sequencer model.
//!
//! The JSON layout keeps the field names used by existing parameter sets:
//!
//! ```json
//! {
//!   "name": "basic",
//!   "readLen": 125,
//!   "insertLen": [0, 0.5, 1],
//!   "meanCountForward": [1],
//!   "qualityHistForward": [[[0, 1], ...]],
//!   "substChoicesForward": [[[1, 1, 1, 1], [0, 1, 1, 1], ...], ...],
//!   "insForward": [[0, 0, 0, 0], ...],
//!   "delForward": [[0, 0, 0, 0], ...],
//!   ...
//! }
//! ```
//!
//! with a `...Reverse` counterpart for every per-strand table.

use crate::distributions::Cdf;
use crate::error::ModelError;
use crate::models::{ErrorModel, InsertSizeModel, QualityModel, SequencerModel, Strand, StrandModel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    pub name: String,
    pub read_len: usize,
    pub insert_len: Cdf,
    pub mean_count_forward: Cdf,
    pub mean_count_reverse: Cdf,
    pub quality_hist_forward: Vec<Vec<Cdf>>,
    pub quality_hist_reverse: Vec<Vec<Cdf>>,
    pub subst_choices_forward: Vec<[Cdf; 4]>,
    pub subst_choices_reverse: Vec<[Cdf; 4]>,
    pub ins_forward: Vec<[f64; 4]>,
    pub ins_reverse: Vec<[f64; 4]>,
    pub del_forward: Vec<[f64; 4]>,
    pub del_reverse: Vec<[f64; 4]>,
}

impl TryFrom<ModelRecord> for SequencerModel {
    type Error = ModelError;

    fn try_from(record: ModelRecord) -> Result<Self, Self::Error> {
        let read_len = record.read_len;
        let forward = StrandModel {
            quality: QualityModel::new(
                Strand::Forward,
                record.mean_count_forward,
                record.quality_hist_forward,
                read_len,
            )?,
            errors: ErrorModel::new(
                Strand::Forward,
                record.subst_choices_forward,
                record.ins_forward,
                record.del_forward,
                read_len,
            )?,
        };
        let reverse = StrandModel {
            quality: QualityModel::new(
                Strand::Reverse,
                record.mean_count_reverse,
                record.quality_hist_reverse,
                read_len,
            )?,
            errors: ErrorModel::new(
                Strand::Reverse,
                record.subst_choices_reverse,
                record.ins_reverse,
                record.del_reverse,
                read_len,
            )?,
        };

        SequencerModel::new(
            record.name,
            read_len,
            InsertSizeModel::new(record.insert_len),
            forward,
            reverse,
        )
    }
}

impl From<&SequencerModel> for ModelRecord {
    fn from(model: &SequencerModel) -> Self {
        let forward = model.strand(Strand::Forward);
        let reverse = model.strand(Strand::Reverse);

        Self {
            name: model.name().to_string(),
            read_len: model.read_len(),
            insert_len: model.insert_size().cdf().clone(),
            mean_count_forward: forward.quality.bins().clone(),
            mean_count_reverse: reverse.quality.bins().clone(),
            quality_hist_forward: forward.quality.histograms().to_vec(),
            quality_hist_reverse: reverse.quality.histograms().to_vec(),
            subst_choices_forward: forward.errors.substitutions().to_vec(),
            subst_choices_reverse: reverse.errors.substitutions().to_vec(),
            ins_forward: forward.errors.insertions().to_vec(),
            ins_reverse: reverse.errors.insertions().to_vec(),
            del_forward: forward.errors.deletions().to_vec(),
            del_reverse: reverse.errors.deletions().to_vec(),
        }
    }
}
