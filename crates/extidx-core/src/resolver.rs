//! Picking the one artifact to install for an extension.
//!
//! Resolution runs a fixed pipeline over the candidates the index lists for
//! a name:
//!
//! 1. filter: universal wheels only, host-compatible only, and (unless an
//!    exact version was requested) strictly newer than the installed version
//! 2. rank by version, highest first, stable for equal versions
//! 3. select the exact requested version, or the highest
//! 4. rewrite the download URL onto the cloud's mirror, if it has one
//!
//! Every "nothing to install" outcome is an [`Error::NoCandidates`]. A
//! candidate whose version cannot be parsed aborts resolution with
//! [`Error::Meta`] instead of being skipped.

use extidx_meta::{Candidate, ExtVersion};

use crate::error::{Error, Result};
use crate::host::HostContext;
use crate::index::{EXTENSION_SECTION, INDEX_URL_KEY, IndexSource};

/// Path segment under the mirror root that holds extension artifacts.
pub const MIRROR_EXTENSIONS_DIR: &str = "extensions";

/// What to resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveRequest {
    /// Extension name, matched case-sensitively.
    pub name: String,
    /// Installed version; only newer releases are considered.
    pub cur_version: Option<String>,
    /// Index location override.
    pub index_url: Option<String>,
    /// Exact version to install. Disables the installed-version floor.
    pub target_version: Option<String>,
}

impl ResolveRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_current_version(mut self, version: impl Into<String>) -> Self {
        self.cur_version = non_empty(version.into());
        self
    }

    pub fn with_target_version(mut self, version: impl Into<String>) -> Self {
        self.target_version = non_empty(version.into());
        self
    }

    pub fn with_index_url(mut self, url: impl Into<String>) -> Self {
        self.index_url = non_empty(url.into());
        self
    }

    fn cur_version(&self) -> Option<&str> {
        self.cur_version.as_deref().filter(|v| !v.is_empty())
    }

    fn target_version(&self) -> Option<&str> {
        self.target_version.as_deref().filter(|v| !v.is_empty())
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// The chosen artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub download_url: String,
    /// Expected SHA-256 of the artifact; verified by the installer.
    pub digest: Option<String>,
}

/// One stage of the candidate filter chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateFilter {
    /// Keep platform-independent artifacts (`none` ABI, `any` platform).
    Universal,
    /// Keep releases whose host-version bounds admit the running host.
    HostCompatible,
    /// Keep releases strictly newer than the given version.
    NewerThan(ExtVersion),
}

impl CandidateFilter {
    /// Whether `candidate` passes this stage. Rejections are logged.
    pub fn accepts(&self, candidate: &Candidate, host: &dyn HostContext) -> Result<bool> {
        match self {
            Self::Universal => {
                if candidate.is_universal() {
                    return Ok(true);
                }
                tracing::debug!(
                    filename = %candidate.filename,
                    download_url = candidate.download_url.as_deref().unwrap_or("<none>"),
                    "Skipping non-universal wheel; platform specific extensions are not \
                     detected and must be installed from their full URL"
                );
                Ok(false)
            }
            Self::HostCompatible => {
                let compat = host.is_compatible(&candidate.metadata)?;
                if compat.is_compatible {
                    return Ok(true);
                }
                tracing::debug!(
                    filename = %candidate.filename,
                    host_version = %compat.host_version,
                    ext_version = %candidate.metadata.version,
                    min_host_required = ?compat.min_required,
                    max_host_required = ?compat.max_required,
                    min_ext_required = ?compat.min_ext_required,
                    "Skipping release not compatible with this host"
                );
                Ok(false)
            }
            Self::NewerThan(floor) => {
                let version = candidate.parsed_version()?;
                if &version > floor {
                    return Ok(true);
                }
                tracing::debug!(
                    filename = %candidate.filename,
                    %version,
                    current = %floor,
                    "Skipping release not newer than the current version"
                );
                Ok(false)
            }
        }
    }
}

/// Build the filter chain for a request, in application order.
///
/// The version floor is only added when no exact version was requested and
/// an installed version is known.
pub fn filter_chain(
    cur_version: Option<&str>,
    target_version: Option<&str>,
) -> Result<Vec<CandidateFilter>> {
    let mut filters = vec![CandidateFilter::Universal, CandidateFilter::HostCompatible];
    if target_version.is_none() {
        if let Some(current) = cur_version {
            filters.push(CandidateFilter::NewerThan(ExtVersion::parse(current)?));
        }
    }
    Ok(filters)
}

/// Run `candidates` through `filters` in order, each stage narrowing the set.
pub fn apply_filters<'c>(
    mut candidates: Vec<&'c Candidate>,
    filters: &[CandidateFilter],
    host: &dyn HostContext,
) -> Result<Vec<&'c Candidate>> {
    for filter in filters {
        tracing::debug!(stage = ?filter, candidates = ?filenames(&candidates), "Filtering");
        let mut kept = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if filter.accepts(candidate, host)? {
                kept.push(candidate);
            }
        }
        candidates = kept;
    }
    Ok(candidates)
}

/// Order candidates by version, highest first. Equal versions keep their
/// input order.
pub fn rank<'c>(candidates: Vec<&'c Candidate>) -> Result<Vec<&'c Candidate>> {
    let mut keyed = candidates
        .into_iter()
        .map(|candidate| -> Result<_> { Ok((candidate.parsed_version()?, candidate)) })
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    Ok(keyed.into_iter().map(|(_, candidate)| candidate).collect())
}

/// Pick from ranked candidates: the first whose version text equals
/// `target_version` exactly, or the first overall.
pub fn select<'c>(ranked: &[&'c Candidate], target_version: Option<&str>) -> Result<&'c Candidate> {
    match target_version {
        Some(target) => ranked
            .iter()
            .copied()
            .find(|candidate| candidate.metadata.version == target)
            .ok_or_else(|| Error::version_not_found(target)),
        None => {
            tracing::debug!("Choosing the latest of the remaining candidates");
            ranked.first().copied().ok_or_else(Error::no_suitable)
        }
    }
}

/// `<endpoint>/extensions/<basename of download_url>`.
pub fn mirror_download_url(download_url: &str, endpoint: &str) -> String {
    let artifact = download_url.rsplit('/').next().unwrap_or(download_url);
    format!(
        "{}/{MIRROR_EXTENSIONS_DIR}/{artifact}",
        endpoint.trim_end_matches('/')
    )
}

fn filenames<'c>(candidates: &[&'c Candidate]) -> Vec<&'c str> {
    candidates.iter().map(|c| c.filename.as_str()).collect()
}

/// A candidate listed with the verdicts of the first two filter stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableVersion {
    pub version: String,
    pub filename: String,
    pub universal: bool,
    pub compatible: bool,
    pub download_url: Option<String>,
}

/// Resolves extension names to downloadable artifacts.
pub struct Resolver<'a> {
    index: &'a dyn IndexSource,
    host: &'a dyn HostContext,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a dyn IndexSource, host: &'a dyn HostContext) -> Self {
        Self { index, host }
    }

    /// Find the download URL and digest of the best artifact for `request`.
    pub fn resolve_download(&self, request: &ResolveRequest) -> Result<Resolution> {
        let extensions = self
            .index
            .extensions(request.index_url.as_deref(), self.host)?;
        let candidates: Vec<&Candidate> = extensions
            .get(&request.name)
            .map(|list| list.iter().collect())
            .unwrap_or_default();
        if candidates.is_empty() {
            return Err(Error::no_extension(&request.name));
        }

        let target_version = request.target_version();
        let filters = filter_chain(request.cur_version(), target_version)?;
        let candidates = apply_filters(candidates, &filters, self.host)?;
        if candidates.is_empty() {
            return Err(Error::no_suitable());
        }

        let ranked = rank(candidates)?;
        tracing::debug!(candidates = ?filenames(&ranked), "Ranked");

        let chosen = select(&ranked, target_version)?;
        tracing::debug!(
            filename = %chosen.filename,
            version = %chosen.metadata.version,
            "Chosen"
        );

        let download_url = chosen
            .download_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(Error::no_download_url)?;

        Ok(Resolution {
            download_url: self.apply_mirror(download_url),
            digest: chosen.sha256_digest.clone(),
        })
    }

    /// The project home page of `name`, taken from its first listed candidate.
    pub fn resolve_project_url(&self, name: &str) -> Result<String> {
        let extensions = self.index.extensions(None, self.host)?;
        let first = extensions
            .get(name)
            .and_then(|list| list.first())
            .ok_or_else(|| Error::no_extension(name))?;

        match first.metadata.home_page() {
            Some(url) => Ok(url.to_string()),
            None => {
                tracing::debug!(%name, "No project_urls.Home in extension metadata");
                Err(Error::Configuration(format!(
                    "Could not find project information for extension {name}."
                )))
            }
        }
    }

    /// Every listed release of `name`, ranked highest first, with its
    /// universality and compatibility verdicts.
    pub fn available_versions(
        &self,
        name: &str,
        index_url: Option<&str>,
    ) -> Result<Vec<AvailableVersion>> {
        let extensions = self.index.extensions(index_url, self.host)?;
        let candidates: Vec<&Candidate> = extensions
            .get(name)
            .map(|list| list.iter().collect())
            .unwrap_or_default();
        if candidates.is_empty() {
            return Err(Error::no_extension(name));
        }

        rank(candidates)?
            .into_iter()
            .map(|candidate| -> Result<AvailableVersion> {
                Ok(AvailableVersion {
                    version: candidate.metadata.version.clone(),
                    filename: candidate.filename.clone(),
                    universal: CandidateFilter::Universal.accepts(candidate, self.host)?,
                    compatible: CandidateFilter::HostCompatible.accepts(candidate, self.host)?,
                    download_url: candidate.download_url.clone(),
                })
            })
            .collect()
    }

    /// Mirrored clouds host the artifacts under their own root while the
    /// index still lists public URLs. An explicitly configured index is
    /// trusted to list the right URLs already.
    fn apply_mirror(&self, download_url: &str) -> String {
        let Some(endpoint) = self.host.mirror_endpoint() else {
            return download_url.to_string();
        };
        if let Some(index_url) = self.host.local_config(EXTENSION_SECTION, INDEX_URL_KEY) {
            tracing::warn!(
                %endpoint,
                %index_url,
                "Mirror endpoint set but index URL configured locally; keeping download URL as listed"
            );
            return download_url.to_string();
        }

        let mirrored = mirror_download_url(download_url, endpoint);
        tracing::debug!(original = %download_url, %mirrored, "Rewrote download URL for mirror");
        mirrored
    }
}
