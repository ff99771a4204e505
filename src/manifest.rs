//! YAML edits applied to Argo CD application manifests, and extraction of
//! deployed image tags from Argo CD source-tracking files.
//!
//! Nothing here performs I/O: callers load the raw content through the
//! forge, hand it to [`Application::parse`] or [`image_tag_from_source`],
//! and write back whatever [`Application::render`] produces.
use color_eyre::eyre::WrapErr;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::{
    config::{IGNORE_TAGS_VALUE, IMAGE_TAG_PARAM},
    error::GitopsError,
    result::Result,
};

/// Annotation that makes argocd-image-updater skip every new tag of the
/// service's image.
pub fn ignore_tags_annotation(service: &str) -> String {
    format!("argocd-image-updater.argoproj.io/{service}.ignore-tags")
}

#[derive(Debug, Deserialize)]
struct SourceTracking {
    helm: HelmSource,
}

#[derive(Debug, Deserialize)]
struct HelmSource {
    #[serde(default)]
    parameters: Vec<HelmParameter>,
}

#[derive(Debug, Deserialize)]
struct HelmParameter {
    name: String,
    #[serde(default)]
    value: Value,
}

/// Returns the `image.tag` helm parameter recorded in a source-tracking
/// file. When the parameter appears more than once the last one wins.
pub fn image_tag_from_source(path: &str, content: &str) -> Result<String> {
    let tracking: SourceTracking =
        serde_yaml::from_str(content).wrap_err_with(|| {
            format!("failed to parse source tracking file {path}")
        })?;

    let tag = tracking
        .helm
        .parameters
        .iter()
        .rev()
        .find(|p| p.name == IMAGE_TAG_PARAM)
        .ok_or_else(|| GitopsError::MissingParameter {
            path: path.to_string(),
            param: IMAGE_TAG_PARAM.to_string(),
        })?;

    scalar_to_string(&tag.value).ok_or_else(|| {
        GitopsError::manifest_field(path, "helm.parameters[].value").into()
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A parsed `application.yaml`. Keys keep their original order so that
/// rewritten files produce minimal diffs.
#[derive(Debug, Clone)]
pub struct Application {
    path: String,
    doc: Value,
}

impl Application {
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        let doc: Value = serde_yaml::from_str(content)
            .wrap_err_with(|| format!("failed to parse manifest {path}"))?;

        if !doc.is_mapping() {
            return Err(GitopsError::manifest_field(path, "<root>").into());
        }

        Ok(Self {
            path: path.to_string(),
            doc,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// `metadata.annotations`, if the manifest has any.
    pub fn annotations(&self) -> Option<&Mapping> {
        self.doc
            .get("metadata")
            .and_then(|m| m.get("annotations"))
            .and_then(Value::as_mapping)
    }

    /// Sets the ignore-tags annotation for `service` to `*`, creating the
    /// annotations mapping when the manifest has none.
    pub fn pause(&mut self, service: &str) -> Result<()> {
        let annotations = self.annotations_mut()?;
        annotations.insert(
            Value::String(ignore_tags_annotation(service)),
            Value::String(IGNORE_TAGS_VALUE.to_string()),
        );
        Ok(())
    }

    /// Removes the ignore-tags annotation for `service` if present.
    pub fn resume(&mut self, service: &str) -> Result<()> {
        let metadata = self.metadata_mut()?;
        if let Some(annotations) = metadata
            .get_mut("annotations")
            .and_then(Value::as_mapping_mut)
        {
            annotations.shift_remove(ignore_tags_annotation(service).as_str());
        }
        Ok(())
    }

    /// `spec.source.helm.parameters`, in file order.
    pub fn helm_parameters(&self) -> Option<&Vec<Value>> {
        self.doc
            .get("spec")
            .and_then(|s| s.get("source"))
            .and_then(|s| s.get("helm"))
            .and_then(|h| h.get("parameters"))
            .and_then(Value::as_sequence)
    }

    /// Drops every existing `image.tag` parameter and appends a single one
    /// carrying `tag`. Other parameters keep their relative order.
    pub fn set_image_tag(&mut self, tag: &str) -> Result<()> {
        let path = self.path.clone();

        let mut node = &mut self.doc;
        for key in ["spec", "source", "helm"] {
            node = node
                .get_mut(key)
                .filter(|v| v.is_mapping())
                .ok_or_else(|| GitopsError::manifest_field(&path, key))?;
        }

        let helm = node
            .as_mapping_mut()
            .ok_or_else(|| GitopsError::manifest_field(&path, "helm"))?;

        let params = helm
            .entry(Value::String("parameters".to_string()))
            .or_insert(Value::Sequence(vec![]));

        if params.is_null() {
            *params = Value::Sequence(vec![]);
        }

        let params = params.as_sequence_mut().ok_or_else(|| {
            GitopsError::manifest_field(&path, "spec.source.helm.parameters")
        })?;

        params.retain(|p| {
            p.get("name").and_then(Value::as_str) != Some(IMAGE_TAG_PARAM)
        });

        let mut image_tag = Mapping::new();
        image_tag.insert("name".into(), IMAGE_TAG_PARAM.into());
        image_tag.insert("value".into(), tag.into());
        params.push(Value::Mapping(image_tag));

        Ok(())
    }

    /// Serializes the manifest in block style with an explicit `---`
    /// document start.
    pub fn render(&self) -> Result<String> {
        let body = serde_yaml::to_string(&self.doc)
            .wrap_err_with(|| format!("failed to render {}", self.path))?;
        Ok(format!("---\n{body}"))
    }

    fn metadata_mut(&mut self) -> Result<&mut Mapping> {
        let path = &self.path;
        self.doc
            .get_mut("metadata")
            .and_then(Value::as_mapping_mut)
            .ok_or_else(|| GitopsError::manifest_field(path, "metadata").into())
    }

    fn annotations_mut(&mut self) -> Result<&mut Mapping> {
        let path = self.path.clone();
        let metadata = self.metadata_mut()?;

        let annotations = metadata
            .entry(Value::String("annotations".to_string()))
            .or_insert(Value::Mapping(Mapping::new()));

        if annotations.is_null() {
            *annotations = Value::Mapping(Mapping::new());
        }

        annotations.as_mapping_mut().ok_or_else(|| {
            GitopsError::manifest_field(path, "metadata.annotations").into()
        })
    }
}
