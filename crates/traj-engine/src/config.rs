use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use traj_core::error::{TrajError, TrajResult};
use traj_core::pbc::CubicBox;
use traj_io::RemainderPolicy;

use crate::executor::Plan;
use crate::plans::analysis::fsk::DEFAULT_K_INDICES;
use crate::plans::{FskPlan, MsdPlan, RdfPlan, VelocityAutoCorrPlan};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Fsk,
    Gr,
    Msd,
    Cvv,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 4] = [
        AnalysisKind::Fsk,
        AnalysisKind::Gr,
        AnalysisKind::Msd,
        AnalysisKind::Cvv,
    ];

    pub fn stage(self) -> &'static str {
        match self {
            AnalysisKind::Fsk => "fsk",
            AnalysisKind::Gr => "gr",
            AnalysisKind::Msd => "msd",
            AnalysisKind::Cvv => "cvv",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AnalysisKind::Fsk => "Fsk",
            AnalysisKind::Gr => "g(r)",
            AnalysisKind::Msd => "MSD",
            AnalysisKind::Cvv => "Cvv",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub n_particles: usize,
    pub n_active: usize,
    pub box_length: f64,
    pub gr_stride: usize,
    pub gr_bins: usize,
    pub k_indices: Vec<[i32; 3]>,
    pub max_lag: Option<usize>,
    pub cvv_normalize: bool,
    pub remainder: RemainderPolicy,
    pub analyses: Vec<AnalysisKind>,
    pub isolate_failures: bool,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub positions: String,
    pub velocities: String,
    pub energies: String,
    pub fsk_output: String,
    pub gr_output: String,
    pub msd_output: String,
    pub cvv_output: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            n_particles: 1000,
            n_active: 800,
            box_length: 9.4,
            gr_stride: 100,
            gr_bins: 100,
            k_indices: DEFAULT_K_INDICES.to_vec(),
            max_lag: None,
            cvv_normalize: false,
            remainder: RemainderPolicy::Reject,
            analyses: AnalysisKind::ALL.to_vec(),
            isolate_failures: false,
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            positions: "rtraj.csv".into(),
            velocities: "vtraj.csv".into(),
            energies: "Energies.csv".into(),
            fsk_output: "fsk.csv".into(),
            gr_output: "gr.csv".into(),
            msd_output: "msd.csv".into(),
            cvv_output: "cvv.csv".into(),
        }
    }
}

impl AnalysisConfig {
    /// Loads JSON, or YAML for `.yaml`/`.yml` files.
    pub fn from_path(path: &Path) -> TrajResult<Self> {
        if !path.is_file() {
            return Err(TrajError::MissingInput(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext == "yaml" || ext == "yml" {
            serde_yaml::from_str(&content)
                .map_err(|e| TrajError::Parse(format!("yaml parse error: {e}")))
        } else {
            serde_json::from_str(&content)
                .map_err(|e| TrajError::Parse(format!("json parse error: {e}")))
        }
    }

    pub fn validated(self) -> TrajResult<Self> {
        if self.n_particles == 0 {
            return Err(TrajError::Invalid("n_particles must be positive".into()));
        }
        if self.n_active > self.n_particles {
            return Err(TrajError::Invalid(format!(
                "n_active ({}) exceeds n_particles ({})",
                self.n_active, self.n_particles
            )));
        }
        CubicBox::new(self.box_length)?;
        if self.analyses.contains(&AnalysisKind::Gr) {
            if self.n_active < 2 {
                return Err(TrajError::Invalid("g(r) needs n_active >= 2".into()));
            }
            if self.gr_stride == 0 || self.gr_bins == 0 {
                return Err(TrajError::Invalid(
                    "gr_stride and gr_bins must be positive".into(),
                ));
            }
        }
        if self.k_indices.is_empty() {
            return Err(TrajError::Invalid("k_indices must not be empty".into()));
        }
        Ok(self)
    }

    pub fn pbc(&self) -> TrajResult<CubicBox> {
        CubicBox::new(self.box_length)
    }

    pub fn input_path(&self, name: &str) -> PathBuf {
        self.input_dir.join(name)
    }

    pub fn output_path(&self, kind: AnalysisKind) -> PathBuf {
        let name = match kind {
            AnalysisKind::Fsk => &self.fsk_output,
            AnalysisKind::Gr => &self.gr_output,
            AnalysisKind::Msd => &self.msd_output,
            AnalysisKind::Cvv => &self.cvv_output,
        };
        self.output_dir.join(name)
    }

    pub fn build_plan(&self, kind: AnalysisKind) -> TrajResult<Box<dyn Plan>> {
        let pbc = self.pbc()?;
        let plan: Box<dyn Plan> = match kind {
            AnalysisKind::Fsk => Box::new(
                FskPlan::new(pbc)
                    .with_k_indices(&self.k_indices)?
                    .with_max_lag(self.max_lag),
            ),
            AnalysisKind::Gr => Box::new(RdfPlan::new(
                pbc,
                self.n_active,
                self.gr_stride,
                self.gr_bins,
            )?),
            AnalysisKind::Msd => Box::new(MsdPlan::new(pbc).with_max_lag(self.max_lag)),
            AnalysisKind::Cvv => Box::new(
                VelocityAutoCorrPlan::new()
                    .with_max_lag(self.max_lag)
                    .with_normalize(self.cvv_normalize),
            ),
        };
        Ok(plan)
    }
}
