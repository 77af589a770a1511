/*! Context-aware spelling and word-choice correction.

Words are checked against a dictionary with generated inflections and a
session-local custom dictionary. Misspelled words are replaced with the
synonym that best fits the surrounding words, as recorded in a symmetric
thesaurus, or else with the nearest entry of a fixed table of common
misspellings. Words that cannot be resolved are reported as ranges over the
corrected text so an editor can mark them.

# Usage examples

```
use contextspell::fallback::{CorrectionMap, FallbackCorrector};
use contextspell::pipeline::CorrectionPipeline;
use contextspell::thesaurus::Thesaurus;

let mut thesaurus = Thesaurus::new();
thesaurus.load_dictionary("the\nbrown\nfox\n".as_bytes());

let fallback = FallbackCorrector::new(CorrectionMap::new(vec![("teh", "the")]));
let pipeline = CorrectionPipeline::new(thesaurus.into_shared(), fallback);
let correction = pipeline.run("Teh quikc brown fox");

assert_eq!(correction.text, "the quikc brown fox");
assert_eq!(correction.misspelled.len(), 1);
```

For correction while the user types, see [`session::AutoCorrector`].
*/

#![warn(missing_docs)]
pub mod config;
pub mod debounce;
pub mod distance;
pub mod error;
pub mod fallback;
pub mod pipeline;
pub mod ranker;
pub mod session;
pub mod surface;
pub mod thesaurus;
pub mod tokenizer;

/// Sets up `env_logger` from the `RUST_LOG` environment variable. Calling
/// it more than once is harmless.
#[cfg(feature = "logging")]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}
