use std::thread::sleep;
use std::time::Duration;

use contextspell::config::CorrectorConfig;
use contextspell::fallback::{CorrectionMap, FallbackCorrector};
use contextspell::pipeline::{CorrectionPipeline, MisspelledRange};
use contextspell::session::AutoCorrector;
use contextspell::surface::{segments, BufferSurface, TextSurface};
use contextspell::thesaurus::Thesaurus;

const THESAURUS: &str = "\
quick|adj
    fast, rapid, speedy, swift
(motion)
race|n
    contest, fast
car|n
    automobile, fast
";

const DICTIONARY: &str = "\
the
brown
fox
quick/A
fast
rapid
speedy
swift
race/SV
contest/S
car/S
automobile/S
";

fn thesaurus() -> Thesaurus {
    let mut t = Thesaurus::new();
    t.load_thesaurus(THESAURUS.as_bytes());
    t.load_dictionary(DICTIONARY.as_bytes());
    t
}

fn teh_only() -> FallbackCorrector {
    FallbackCorrector::new(CorrectionMap::new(vec![("teh", "the")]))
}

#[test]
fn teh_quikc_brown_fox() {
    let pipeline = CorrectionPipeline::new(thesaurus().into_shared(), teh_only());

    let out = pipeline.run("Teh quikc brown fox");

    assert_eq!(out.text, "the quikc brown fox");
    assert_eq!(out.misspelled, vec![MisspelledRange { start: 4, len: 5 }]);
    assert_eq!(out.misspelled_words(), vec!["quikc"]);
}

#[test]
fn corrected_text_is_stable() {
    let pipeline = CorrectionPipeline::new(thesaurus().into_shared(), teh_only());

    let text = "The quick brown fox races the automobile.";
    let first = pipeline.run(text);
    let second = pipeline.run(&first.text);

    assert_eq!(first.text, text);
    assert!(first.is_clean());
    assert_eq!(first, second);
}

#[test]
fn context_picks_replacement() {
    let mut t = Thesaurus::new();
    t.load_thesaurus("qwick|adj\n    rapid, fast\ncar|n\n    fast\nrace|n\n    fast\n".as_bytes());
    t.load_dictionary("rapid\nfast\ncar\nrace\n".as_bytes());
    let pipeline = CorrectionPipeline::new(t.into_shared(), teh_only());

    // "fast" is listed under both neighbours, as a noun, and "rapid" under neither
    let out = pipeline.run("race qwick car");
    assert_eq!(out.text, "race fast car");
    assert!(out.is_clean());
}

#[test]
fn ranges_stay_in_bounds_and_ordered() {
    let pipeline = CorrectionPipeline::new(thesaurus().into_shared(), teh_only());

    let out = pipeline.run("teh zzyzx, brown qqqq fox xxqx");
    let total = out.text.chars().count();

    assert_eq!(out.text, "the zzyzx, brown qqqq fox xxqx");
    assert_eq!(out.misspelled.len(), 3);
    for pair in out.misspelled.windows(2) {
        assert!(pair[0].end() <= pair[1].start);
    }
    assert!(out.misspelled.iter().all(|r| r.end() <= total));

    let marked: Vec<&str> = segments(&out.text, &out.misspelled)
        .into_iter()
        .filter(|s| s.misspelled)
        .map(|s| s.text)
        .collect();
    assert_eq!(marked, vec!["zzyzx", "qqqq", "xxqx"]);
}

#[test]
fn synonyms_are_counted() {
    let mut t = thesaurus();

    t.synonyms("quick", None);
    t.synonyms("quick", None);
    let fast: Vec<_> = t
        .synonyms_by_usage("race", None)
        .into_iter()
        .map(|e| (e.text.to_string(), e.usage_frequency))
        .collect();

    assert_eq!(
        fast,
        vec![("contest".to_string(), 1), ("fast".to_string(), 1)]
    );
    assert_eq!(t.synonyms("fast", None).len(), 3);
}

#[test]
fn session_end_to_end() {
    let config = CorrectorConfig {
        typing_delay_ms: 30,
        ..CorrectorConfig::default()
    };
    let pipeline =
        CorrectionPipeline::from_config(thesaurus().into_shared(), teh_only(), &config);
    let session = AutoCorrector::from_config(pipeline, BufferSurface::new(""), &config);

    for text in ["T", "Te", "Teh", "Teh quikc", "Teh quikc fox"].iter() {
        session.surface().edit(text);
        session.on_text_changed();
    }
    sleep(Duration::from_millis(400));

    {
        let surface = session.surface();
        assert_eq!(surface.text(), "the quikc fox");
        assert_eq!(surface.marked(), &["quikc".to_string()]);
    }

    let out = session.add_to_custom_dictionary("quikc").unwrap();
    assert!(out.is_clean());
    assert!(session.surface().marked().is_empty());
}
