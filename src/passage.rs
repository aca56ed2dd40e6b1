use cgisf_lib::cgisf;
use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde_json::from_str;

static PASSAGE_DIR: Dir = include_dir!("src/passages");

/// One embedded passage library.
#[derive(Deserialize, Clone, Debug)]
pub struct PassageSet {
    pub name: String,
    pub size: u32,
    pub passages: Vec<String>,
}

impl PassageSet {
    pub fn new(file_name: &str) -> Self {
        let file = PASSAGE_DIR
            .get_file(format!("{file_name}.json"))
            .expect("Passage file not found");
        let contents = file
            .contents_utf8()
            .expect("Unable to interpret passage file as a string");
        from_str(contents).expect("Unable to deserialize passage json")
    }
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum SupportedLibrary {
    Proverbs,
    Prose,
}

impl SupportedLibrary {
    pub fn as_set(&self) -> PassageSet {
        PassageSet::new(&self.to_string().to_lowercase())
    }
}

/// Where the target text of a race comes from.
#[derive(Debug, Clone)]
pub struct PassageConfig {
    /// A caller-supplied passage wins over everything else.
    pub custom: Option<String>,
    /// Generate this many sentences instead of drawing from a library.
    pub sentences: Option<usize>,
    pub library: SupportedLibrary,
}

impl Default for PassageConfig {
    fn default() -> Self {
        Self {
            custom: None,
            sentences: None,
            library: SupportedLibrary::Proverbs,
        }
    }
}

/// Resolves the passage for one race.
pub struct PassageProvider {
    config: PassageConfig,
}

impl PassageProvider {
    pub fn new(config: PassageConfig) -> Self {
        Self { config }
    }

    pub fn passage(&self, rng: &mut impl Rng) -> String {
        if let Some(ref custom) = self.config.custom {
            return custom.clone();
        }
        if let Some(count) = self.config.sentences {
            return generate_sentences(count, rng);
        }
        let set = self.config.library.as_set();
        set.passages
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| "the quick brown fox jumps over the lazy dog".to_string())
    }
}

/// Builds a passage out of generated sentences.
fn generate_sentences(count: usize, rng: &mut impl Rng) -> String {
    let mut out = String::new();
    for i in 0..count {
        let mut s = cgisf(
            rng.gen_range(1..3),
            rng.gen_range(1..3),
            rng.gen_range(1..5),
            rng.gen_bool(0.5),
            rng.gen_range(1..3),
            rng.gen_bool(0.5),
        );
        if i == count - 1 {
            s.pop();
        }
        out.push_str(&s);
    }
    out
}
