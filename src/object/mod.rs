//! 对象翻译模块：按字段路径批量翻译结构化记录。
//!
//! # Object Translation Module
//!
//! [`ObjectTranslator`] translates the string fields (and string arrays) named
//! by dot paths across a list of JSON records, with one batch call per list.
//! Input records are never mutated; translated copies are returned in the
//! same order.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ObjectTranslator`] | Extract, batch-translate, and rebuild records |
//! | [`ExtractionPlan`] | Flat text list plus the address of every extracted string |
//! | [`extract_translatable_text`] | List string leaves with their display paths |

mod extract;

pub use extract::{
    extract_translatable_text, parse_field_paths, ExtractionPlan, PathEntry, TranslatableText,
};

use crate::translate::TranslationService;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ObjectTranslator {
    service: TranslationService,
}

impl ObjectTranslator {
    pub fn new(service: TranslationService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Translate `field_paths` in every record of `objects`.
    ///
    /// Each path addresses a string (translated) or an array (its string
    /// elements translated, other elements left alone). Missing paths and
    /// other value types are skipped. Failed translations keep the original
    /// string, so the result always has `objects.len()` records.
    pub async fn translate_object_array<S: AsRef<str>>(
        &self,
        objects: &[Value],
        field_paths: &[S],
        target_lang: &str,
        source_lang: &str,
    ) -> Vec<Value> {
        if objects.is_empty() || source_lang == target_lang {
            return objects.to_vec();
        }

        let fields = parse_field_paths(field_paths);
        let plan = ExtractionPlan::extract(objects, &fields);
        if plan.is_empty() {
            return objects.to_vec();
        }

        debug!(
            objects = objects.len(),
            texts = plan.len(),
            source_lang,
            target_lang,
            "translating object fields"
        );

        let translated = self
            .service
            .translate_batch(&plan.texts, source_lang, target_lang)
            .await;
        plan.reconstruct(objects, &translated)
    }

    pub async fn translate_object<S: AsRef<str>>(
        &self,
        object: &Value,
        field_paths: &[S],
        target_lang: &str,
        source_lang: &str,
    ) -> Value {
        self.translate_object_array(
            std::slice::from_ref(object),
            field_paths,
            target_lang,
            source_lang,
        )
        .await
        .into_iter()
        .next()
        .unwrap_or_else(|| object.clone())
    }

    /// Typed variant of [`translate_object_array`](Self::translate_object_array).
    ///
    /// Records round-trip through `serde_json::Value`; an error means `T` did
    /// not serialize, or a translated record no longer deserializes as `T`.
    pub async fn translate_records<T, S>(
        &self,
        items: &[T],
        field_paths: &[S],
        target_lang: &str,
        source_lang: &str,
    ) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned + Clone,
        S: AsRef<str>,
    {
        if items.is_empty() || source_lang == target_lang {
            return Ok(items.to_vec());
        }

        let values = items
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        self.translate_object_array(&values, field_paths, target_lang, source_lang)
            .await
            .into_iter()
            .map(|value| serde_json::from_value::<T>(value).map_err(crate::Error::from))
            .collect()
    }

    pub async fn translate_record<T, S>(
        &self,
        item: &T,
        field_paths: &[S],
        target_lang: &str,
        source_lang: &str,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Clone,
        S: AsRef<str>,
    {
        let mut out = self
            .translate_records(std::slice::from_ref(item), field_paths, target_lang, source_lang)
            .await?;
        Ok(out.pop().unwrap_or_else(|| item.clone()))
    }
}
