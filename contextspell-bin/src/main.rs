use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use gumdrop::Options;
use serde::Serialize;

use contextspell::config::CorrectorConfig;
use contextspell::fallback::FallbackCorrector;
use contextspell::pipeline::{Correction, CorrectionPipeline, MisspelledRange};
use contextspell::surface::segments;
use contextspell::thesaurus::{PartOfSpeech, Thesaurus, WordEntry};
use contextspell::tokenizer::Tokenize;

trait OutputWriter {
    fn write_correction(&mut self, input: &str, correction: &Correction);
    fn write_synonyms(&mut self, word: &str, synonyms: &[WordEntry]);
    fn finish(&mut self) -> anyhow::Result<()>;
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_correction(&mut self, input: &str, correction: &Correction) {
        let marked: String = segments(&correction.text, &correction.misspelled)
            .into_iter()
            .map(|s| {
                if s.misspelled {
                    format!("[{}]", s.text)
                } else {
                    s.text.to_string()
                }
            })
            .collect();

        println!("Input:     {}", input);
        println!("Corrected: {}", marked);
        if !correction.is_clean() {
            println!("Unresolved: {}", correction.misspelled_words().join(", "));
        }
    }

    fn write_synonyms(&mut self, word: &str, synonyms: &[WordEntry]) {
        if synonyms.is_empty() {
            println!("{}\t\t[NO SYNONYMS]", word);
            return;
        }

        println!("{}", word);
        for entry in synonyms {
            println!(
                "    {}\t\t{}\t{}",
                entry.text, entry.part_of_speech, entry.usage_frequency
            );
        }
        println!();
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Serialize)]
struct CorrectionRecord {
    input: String,
    text: String,
    misspelled: Vec<MisspelledRange>,
}

#[derive(Serialize)]
struct SynonymRecord {
    word: String,
    synonyms: Vec<WordEntry>,
}

#[derive(Serialize, Default)]
struct JsonWriter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    corrections: Vec<CorrectionRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    synonyms: Vec<SynonymRecord>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter::default()
    }
}

impl OutputWriter for JsonWriter {
    fn write_correction(&mut self, input: &str, correction: &Correction) {
        self.corrections.push(CorrectionRecord {
            input: input.to_owned(),
            text: correction.text.clone(),
            misspelled: correction.misspelled.clone(),
        });
    }

    fn write_synonyms(&mut self, word: &str, synonyms: &[WordEntry]) {
        self.synonyms.push(SynonymRecord {
            word: word.to_owned(),
            synonyms: synonyms.to_vec(),
        });
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "correct the provided text in context")]
    Correct(CorrectArgs),

    #[options(help = "look up synonyms, most used first")]
    Synonyms(SynonymsArgs),

    #[options(help = "repair typos word by word without context")]
    Fix(FixArgs),

    #[options(help = "print input in word-separated tokenized form")]
    Tokenize(TokenizeArgs),

    #[options(help = "print the loaded thesaurus as JSON")]
    Export(ExportArgs),
}

#[derive(Debug, Options)]
struct CorrectArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "t", help = "thesaurus source file")]
    thesaurus: Option<PathBuf>,

    #[options(short = "d", help = "dictionary source file")]
    dictionary: Option<PathBuf>,

    #[options(short = "c", help = "JSON configuration file")]
    config: Option<PathBuf>,

    #[options(no_short, help = "comma-separated words to accept as correct")]
    custom: Option<String>,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "text to be corrected")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct SynonymsArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "t", help = "thesaurus source file", required)]
    thesaurus: PathBuf,

    #[options(short = "d", help = "dictionary source file")]
    dictionary: Option<PathBuf>,

    #[options(short = "p", help = "only this part of speech (n, v, adj, adv)")]
    pos: Option<String>,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "words to look up")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct FixArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "largest edit distance accepted")]
    threshold: Option<usize>,

    #[options(free, help = "text to be repaired")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct TokenizeArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "w", long = "words", help = "show words only")]
    is_words_only: bool,

    #[options(free, help = "text to be tokenized")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct ExportArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "t", help = "thesaurus source file", required)]
    thesaurus: PathBuf,

    #[options(short = "d", help = "dictionary source file")]
    dictionary: Option<PathBuf>,
}

fn read_input(inputs: Vec<String>) -> anyhow::Result<String> {
    if !inputs.is_empty() {
        return Ok(inputs.join(" "));
    }

    eprintln!("Reading from stdin...");
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("reading stdin")?;
    Ok(buffer)
}

fn load_thesaurus(
    thesaurus: Option<&PathBuf>,
    dictionary: Option<&PathBuf>,
    config: &CorrectorConfig,
) -> Thesaurus {
    let mut out = Thesaurus::from_config(config);

    if let Some(path) = thesaurus {
        out.load_thesaurus_path(path);
    }

    if let Some(path) = dictionary {
        out.load_dictionary_path(path);
    }

    out
}

fn correct(args: CorrectArgs) -> anyhow::Result<()> {
    let config = match args.config.as_ref() {
        Some(path) => CorrectorConfig::from_path(path)?,
        None => CorrectorConfig::default(),
    };

    let mut thesaurus = load_thesaurus(args.thesaurus.as_ref(), args.dictionary.as_ref(), &config);

    if let Some(words) = args.custom.as_ref() {
        for word in words.split(',').filter(|w| !w.trim().is_empty()) {
            thesaurus.add_custom_word(word)?;
        }
    }

    let pipeline =
        CorrectionPipeline::from_config(thesaurus.into_shared(), FallbackCorrector::default(), &config);

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    let input = read_input(args.inputs)?;
    for line in input.lines().filter(|l| !l.trim().is_empty()) {
        let correction = pipeline.run(line);
        writer.write_correction(line, &correction);
    }

    writer.finish()
}

fn synonyms(args: SynonymsArgs) -> anyhow::Result<()> {
    let config = CorrectorConfig::default();
    let mut thesaurus = load_thesaurus(Some(&args.thesaurus), args.dictionary.as_ref(), &config);

    if args.dictionary.is_none() {
        // without a dictionary nothing would pass the validity filter
        let words: Vec<String> = thesaurus.headwords().map(|w| w.to_string()).collect();
        for word in words.iter() {
            thesaurus.add_valid_word(word)?;
        }
    }

    let pos = args.pos.as_deref().map(PartOfSpeech::from_abbrev);

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    let input = read_input(args.inputs)?;
    for word in input.split_whitespace() {
        let found = thesaurus.synonyms_by_usage(word, pos);
        writer.write_synonyms(word, &found);
    }

    writer.finish()
}

fn fix(args: FixArgs) -> anyhow::Result<()> {
    let mut corrector = FallbackCorrector::default();

    if let Some(threshold) = args.threshold {
        corrector = corrector.with_threshold(threshold);
    }

    let input = read_input(args.inputs)?;
    for line in input.lines() {
        println!("{}", corrector.correct_text(line));
    }

    Ok(())
}

fn tokenize(args: TokenizeArgs) -> anyhow::Result<()> {
    let inputs = read_input(args.inputs)?;

    if args.is_words_only {
        for (index, token) in inputs.words().enumerate() {
            println!("{:>4}: \"{}\"", index, token);
        }
    } else {
        for (index, token) in inputs.word_bound_indices() {
            println!("{:>4}: \"{}\"", index, token);
        }
    }

    Ok(())
}

fn export(args: ExportArgs) -> anyhow::Result<()> {
    let config = CorrectorConfig::default();
    let thesaurus = load_thesaurus(Some(&args.thesaurus), args.dictionary.as_ref(), &config);

    let stdout = io::stdout();
    thesaurus.export_json(stdout.lock())?;
    println!();

    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    match args.command {
        None => Ok(()),
        Some(Command::Correct(args)) => correct(args),
        Some(Command::Synonyms(args)) => synonyms(args),
        Some(Command::Fix(args)) => fix(args),
        Some(Command::Tokenize(args)) => tokenize(args),
        Some(Command::Export(args)) => export(args),
    }
}
