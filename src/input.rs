//! JSON documents handed to the command-line front end.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::eligibility::{ApplicantProfile, EligibilityError, RequirementSet};

/// A single evaluation request as produced by the profile and candidate sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    #[serde(default)]
    pub profile: Option<ApplicantProfile>,
    #[serde(default)]
    pub requirements: Option<RequirementSet>,
}

impl EvaluationRequest {
    /// Splits the request, rejecting documents where either record is absent or `null`.
    pub fn into_parts(self) -> Result<(ApplicantProfile, RequirementSet), EligibilityError> {
        let profile = self.profile.ok_or(EligibilityError::InvalidArgument {
            argument: "profile",
        })?;
        let requirements = self.requirements.ok_or(EligibilityError::InvalidArgument {
            argument: "requirements",
        })?;
        Ok((profile, requirements))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn read_document<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, InputError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
