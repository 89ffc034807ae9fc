//! Run configuration, read from a yaml file.

use std::{fs, path::Path};

use yaml_rust::{Yaml, YamlLoader};

use crate::{
    errors::{ConfigError, CraterError, Result},
    seed_points::{FullDomainSeeding, SeedStrategy, SubDomainSeeding},
};

fn parse_real(yaml: &Yaml, section: &str, key: &str) -> std::result::Result<Option<f64>, ConfigError> {
    match &yaml[key] {
        Yaml::BadValue => Ok(None),
        Yaml::Integer(i) => Ok(Some(*i as f64)),
        value @ Yaml::Real(_) => value
            .as_f64()
            .map(Some)
            .ok_or(ConfigError::InvalidValue(format!("{section}:{key}"), value.clone())),
        value => Err(ConfigError::InvalidValue(
            format!("{section}:{key}"),
            value.clone(),
        )),
    }
}

fn parse_count(yaml: &Yaml, section: &str, key: &str) -> std::result::Result<Option<usize>, ConfigError> {
    match &yaml[key] {
        Yaml::BadValue => Ok(None),
        Yaml::Integer(i) if *i >= 0 => Ok(Some(*i as usize)),
        // Allow counts written in scientific notation, e.g. `1e6`
        value @ Yaml::Real(_) => match value.as_f64() {
            Some(r) if r >= 0. && r.fract() == 0. => Ok(Some(r as usize)),
            _ => Err(ConfigError::InvalidValue(
                format!("{section}:{key}"),
                value.clone(),
            )),
        },
        value => Err(ConfigError::InvalidValue(
            format!("{section}:{key}"),
            value.clone(),
        )),
    }
}

fn parse_string(yaml: &Yaml, section: &str, key: &str, default: &str) -> std::result::Result<String, ConfigError> {
    match &yaml[key] {
        Yaml::BadValue => Ok(default.to_string()),
        Yaml::String(s) => Ok(s.clone()),
        value => Err(ConfigError::InvalidValue(
            format!("{section}:{key}"),
            value.clone(),
        )),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainCfg {
    /// Half width of the square domain centered at the origin.
    pub width: f64,
}

impl DomainCfg {
    fn parse(yaml: &Yaml) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            width: parse_real(yaml, "domain", "width")?.unwrap_or(2.),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeedingCfg {
    Full {
        r_inner: f64,
        r_outer: f64,
        alpha: f64,
    },
    SubDomain {
        rank: usize,
        num_ranks: usize,
        nx: usize,
        ny: usize,
        seed: u64,
    },
}

impl SeedingCfg {
    fn parse(yaml: &Yaml, domain: &DomainCfg) -> std::result::Result<Self, ConfigError> {
        let kind = parse_string(yaml, "seeding", "kind", "full")?;
        match kind.as_str() {
            "full" => Ok(Self::Full {
                r_inner: parse_real(yaml, "seeding", "r_inner")?.unwrap_or(0.1),
                r_outer: parse_real(yaml, "seeding", "r_outer")?.unwrap_or(2. * domain.width),
                alpha: parse_real(yaml, "seeding", "alpha")?.unwrap_or(0.005),
            }),
            "sub_domain" => Ok(Self::SubDomain {
                rank: parse_count(yaml, "seeding", "rank")?
                    .ok_or(ConfigError::MissingParameter("seeding:rank".to_string()))?,
                num_ranks: parse_count(yaml, "seeding", "num_ranks")?
                    .ok_or(ConfigError::MissingParameter("seeding:num_ranks".to_string()))?,
                nx: parse_count(yaml, "seeding", "nx")?.unwrap_or(50),
                ny: parse_count(yaml, "seeding", "ny")?.unwrap_or(50),
                seed: parse_count(yaml, "seeding", "seed")?.unwrap_or(0) as u64,
            }),
            _ => Err(ConfigError::UnknownSeeding(kind)),
        }
    }

    /// Build the configured seeding strategy.
    pub fn strategy(&self) -> Result<Box<dyn SeedStrategy>> {
        Ok(match *self {
            Self::Full {
                r_inner,
                r_outer,
                alpha,
            } => Box::new(FullDomainSeeding::new(r_inner, r_outer, alpha)),
            Self::SubDomain {
                rank,
                num_ranks,
                nx,
                ny,
                seed,
            } => Box::new(SubDomainSeeding::new(rank, num_ranks, nx, ny, seed)?),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriggerCfg {
    pub generations: usize,
    pub q: f64,
    pub pressure_threshold: f64,
    pub initial_separation: f64,
}

impl TriggerCfg {
    fn parse(yaml: &Yaml) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            generations: parse_count(yaml, "trigger", "generations")?.unwrap_or(20),
            q: parse_real(yaml, "trigger", "q")?.unwrap_or(0.8),
            pressure_threshold: parse_real(yaml, "trigger", "pressure_threshold")?.unwrap_or(1e-5),
            initial_separation: parse_real(yaml, "trigger", "initial_separation")?.unwrap_or(1.),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticsCfg {
    pub crater_history: String,
    pub cycle_file: String,
    pub time_file: String,
    pub snapshot_prefix: String,
    pub snapshot_suffix: String,
    /// State handed to the engine before the first cycle.
    pub initial_snapshot: String,
    /// State after the last cycle, qualified by the rank for sub domain runs.
    pub final_snapshot: String,
}

impl DiagnosticsCfg {
    fn parse(yaml: &Yaml, seeding: &SeedingCfg) -> std::result::Result<Self, ConfigError> {
        let default_final = match seeding {
            SeedingCfg::Full { .. } => "output/final.h5".to_string(),
            SeedingCfg::SubDomain { rank, .. } => format!("process_{rank}_final.h5"),
        };
        Ok(Self {
            crater_history: parse_string(
                yaml,
                "diagnostics",
                "crater_history",
                "crater_size_history.txt",
            )?,
            cycle_file: parse_string(yaml, "diagnostics", "cycle_file", "cycle.txt")?,
            time_file: parse_string(yaml, "diagnostics", "time_file", "time.txt")?,
            snapshot_prefix: parse_string(yaml, "diagnostics", "snapshot_prefix", "output/snapshot_")?,
            snapshot_suffix: parse_string(yaml, "diagnostics", "snapshot_suffix", ".h5")?,
            initial_snapshot: parse_string(yaml, "diagnostics", "initial_snapshot", "output/initial.h5")?,
            final_snapshot: parse_string(yaml, "diagnostics", "final_snapshot", &default_final)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeIntegrationCfg {
    pub t_end: f64,
    pub max_cycles: usize,
    pub status_interval: usize,
}

impl TimeIntegrationCfg {
    fn parse(yaml: &Yaml) -> std::result::Result<Self, ConfigError> {
        let t_end = parse_real(yaml, "time_integration", "t_end")?.unwrap_or(1.9e-2);
        if !(t_end > 0.) {
            return Err(ConfigError::InvalidValue(
                "time_integration:t_end".to_string(),
                yaml["t_end"].clone(),
            ));
        }
        Ok(Self {
            t_end,
            max_cycles: parse_count(yaml, "time_integration", "max_cycles")?.unwrap_or(1_000_000),
            status_interval: parse_count(yaml, "time_integration", "status_interval")?.unwrap_or(100),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CraterConfig {
    pub domain: DomainCfg,
    pub seeding: SeedingCfg,
    pub trigger: TriggerCfg,
    pub diagnostics: DiagnosticsCfg,
    pub time_integration: TimeIntegrationCfg,
}

impl CraterConfig {
    pub fn parse(yaml: &Yaml) -> std::result::Result<Self, ConfigError> {
        let domain = DomainCfg::parse(&yaml["domain"])?;
        let seeding = SeedingCfg::parse(&yaml["seeding"], &domain)?;
        let diagnostics = DiagnosticsCfg::parse(&yaml["diagnostics"], &seeding)?;
        Ok(Self {
            seeding,
            domain,
            trigger: TriggerCfg::parse(&yaml["trigger"])?,
            diagnostics,
            time_integration: TimeIntegrationCfg::parse(&yaml["time_integration"])?,
        })
    }

    pub fn from_yaml_str(config: &str) -> std::result::Result<Self, ConfigError> {
        let docs = YamlLoader::load_from_str(config)?;
        match docs.first() {
            Some(doc) => Self::parse(doc),
            // An empty document means all defaults
            None => Self::parse(&Yaml::Hash(Default::default())),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = fs::read_to_string(path).map_err(CraterError::io(path))?;
        Ok(Self::from_yaml_str(&config)?)
    }
}
