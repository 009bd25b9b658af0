use crate::error::QuizError;
use include_dir::{include_dir, Dir};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

static BUNDLED_TOPICS: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/topics");

/// Language the prompt and answer texts are read from.
pub const PRIMARY_LANGUAGE: &str = "en";

/// One entry of a topic's question bank. Never mutated once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    pub id: String,
    pub prompt: String,
    pub correct_answer: String,
    pub image: Option<String>,
    /// Prompt translations keyed by language code, e.g. `ja`.
    pub translations: BTreeMap<String, String>,
}

impl QuestionRecord {
    pub fn new(id: impl Into<String>, prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            correct_answer: answer.into(),
            image: None,
            translations: BTreeMap::new(),
        }
    }

    pub fn with_translation(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.translations.insert(lang.into(), text.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// A titled, read-only question bank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topic {
    pub id: String,
    /// File stem the topic was loaded from, used for lookups on the command line.
    pub slug: String,
    pub title: String,
    pub questions: Vec<QuestionRecord>,
}

type LocalizedText = BTreeMap<String, Value>;

#[derive(Deserialize)]
struct TopicFile {
    id: Option<String>,
    title: String,
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

// Content files come in two layouts: `question1` + `answer1_variations` from the
// generated categories, `question` + `answer` from the manual authoring tool.
#[derive(Deserialize)]
struct RawQuestion {
    id: Option<String>,
    question1: Option<LocalizedText>,
    question: Option<LocalizedText>,
    #[serde(default)]
    answer1_variations: Vec<LocalizedText>,
    answer: Option<LocalizedText>,
    image: Option<String>,
}

fn text_in(text: &LocalizedText, lang: &str) -> Option<String> {
    text.get(lang)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl RawQuestion {
    fn into_record(self, fallback_id: String) -> Option<QuestionRecord> {
        let prompt_text = self.question1.or(self.question)?;
        let prompt = text_in(&prompt_text, PRIMARY_LANGUAGE)?;
        let correct_answer = self
            .answer1_variations
            .first()
            .or(self.answer.as_ref())
            .and_then(|a| text_in(a, PRIMARY_LANGUAGE))?;

        let translations = prompt_text
            .keys()
            .filter(|lang| lang.as_str() != PRIMARY_LANGUAGE)
            .filter_map(|lang| text_in(&prompt_text, lang).map(|t| (lang.clone(), t)))
            .collect();

        Some(QuestionRecord {
            id: self.id.unwrap_or(fallback_id),
            prompt,
            correct_answer,
            image: self.image.filter(|s| !s.is_empty()),
            translations,
        })
    }
}

impl Topic {
    pub fn new(id: impl Into<String>, title: impl Into<String>, questions: Vec<QuestionRecord>) -> Self {
        let id = id.into();
        Self {
            slug: id.clone(),
            id,
            title: title.into(),
            questions,
        }
    }

    /// Parse a topic from its JSON content. `slug` names the source, usually the file stem.
    pub fn from_json_str(slug: &str, json: &str) -> Result<Self, QuizError> {
        let file: TopicFile = serde_json::from_str(json).map_err(|source| QuizError::Json {
            origin: slug.to_string(),
            source,
        })?;

        let id = file.id.unwrap_or_else(|| format!("topic_{slug}"));
        let mut seen = HashSet::new();
        let mut questions = Vec::with_capacity(file.questions.len());

        for (idx, raw) in file.questions.into_iter().enumerate() {
            let Some(record) = raw.into_record(format!("{id}_{idx}")) else {
                warn!("{slug}: skipping question #{idx} without an english prompt or answer");
                continue;
            };
            if !seen.insert(record.id.clone()) {
                warn!("{slug}: skipping question #{idx}, duplicate id '{}'", record.id);
                continue;
            }
            questions.push(record);
        }

        debug!("{slug}: loaded {} questions", questions.len());

        Ok(Self {
            id,
            slug: slug.to_string(),
            title: file.title,
            questions,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, QuizError> {
        let json = fs::read_to_string(path).map_err(|source| QuizError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "topic".to_string());
        Self::from_json_str(&slug, &json)
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        !query.is_empty()
            && (self.slug.to_lowercase() == query
                || self.id.to_lowercase() == query
                || self.title.to_lowercase().starts_with(&query))
    }
}

/// All topics available to the player: the bundled set plus user files.
#[derive(Debug, Clone, Default)]
pub struct TopicCatalog {
    topics: Vec<Topic>,
}

impl TopicCatalog {
    pub fn bundled() -> Result<Self, QuizError> {
        let mut topics = BUNDLED_TOPICS
            .files()
            .filter(|f| f.path().extension().is_some_and(|ext| ext == "json"))
            .map(|file| {
                let slug = file
                    .path()
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let json = file.contents_utf8().unwrap_or_default();
                Topic::from_json_str(&slug, json)
            })
            .collect::<Result<Vec<_>, _>>()?;
        topics.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(Self { topics })
    }

    /// Add every `*.json` topic found in `dir`. A missing directory adds nothing;
    /// unreadable files are skipped with a warning.
    pub fn with_dir(mut self, dir: &Path) -> Self {
        let Ok(entries) = fs::read_dir(dir) else {
            debug!("no user topics at {}", dir.display());
            return self;
        };

        let mut paths: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        for path in paths {
            match Topic::from_path(&path) {
                Ok(topic) => self.push(topic),
                Err(err) => warn!("ignoring {}: {err}", path.display()),
            }
        }
        self
    }

    /// Add a topic, replacing any existing one with the same slug.
    pub fn push(&mut self, topic: Topic) {
        self.topics.retain(|t| t.slug != topic.slug);
        self.topics.push(topic);
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn find(&self, query: &str) -> Result<&Topic, QuizError> {
        self.topics
            .iter()
            .find(|t| t.matches(query))
            .ok_or_else(|| QuizError::TopicNotFound(query.to_string()))
    }
}
