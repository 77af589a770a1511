//! Context-free typo repair against a fixed table of known misspellings.
//!
//! Used when the thesaurus has nothing to offer for a word. A word found in
//! the table is replaced outright; otherwise its single-edit typo variations
//! are compared against every known correction and the closest one wins if
//! it is close enough.
use hashbrown::HashMap;
use itertools::Itertools;
use smol_str::SmolStr;

use crate::distance::levenshtein;
use crate::tokenizer::case_handling::lower_case;

/// Largest edit distance accepted unless configured otherwise.
pub const DEFAULT_THRESHOLD: usize = 2;

/// Common English and IT-support misspellings with their corrections.
pub const COMMON_MISSPELLINGS: &[(&str, &str)] = &[
    ("teh", "the"),
    ("recieve", "receive"),
    ("adress", "address"),
    ("occurance", "occurrence"),
    ("definately", "definitely"),
    ("seperate", "separate"),
    ("untill", "until"),
    ("wich", "which"),
    ("comming", "coming"),
    ("alot", "a lot"),
    ("agian", "again"),
    ("thier", "their"),
    ("acheive", "achieve"),
    ("buisness", "business"),
    ("calender", "calendar"),
    ("concious", "conscious"),
    ("enviroment", "environment"),
    ("existance", "existence"),
    ("goverment", "government"),
    ("happend", "happened"),
    ("harrass", "harass"),
    ("independant", "independent"),
    ("neccessary", "necessary"),
    ("occured", "occurred"),
    ("posession", "possession"),
    ("publically", "publicly"),
    ("reccommend", "recommend"),
    ("suprise", "surprise"),
    ("tommorow", "tomorrow"),
    ("wierd", "weird"),
    ("accomodate", "accommodate"),
    ("acheivement", "achievement"),
    ("arguement", "argument"),
    ("attendence", "attendance"),
    ("catagory", "category"),
    ("collegue", "colleague"),
    ("committment", "commitment"),
    ("corperate", "corporate"),
    ("curiculum", "curriculum"),
    ("develope", "develop"),
    ("emplyee", "employee"),
    ("equiptment", "equipment"),
    ("guarentee", "guarantee"),
    ("heirarchy", "hierarchy"),
    ("intergrate", "integrate"),
    ("maintainance", "maintenance"),
    ("managment", "management"),
    ("oppurtunity", "opportunity"),
    ("prefered", "preferred"),
    ("priviledge", "privilege"),
    ("proffesional", "professional"),
    ("relevent", "relevant"),
    ("responce", "response"),
    ("restaraunt", "restaurant"),
    ("schedual", "schedule"),
    ("secratary", "secretary"),
    ("succesful", "successful"),
    ("supercede", "supersede"),
    ("tendancy", "tendency"),
    ("visable", "visible"),
    ("technicaly", "technically"),
    ("funtion", "function"),
    ("seting", "setting"),
    ("configration", "configuration"),
    ("resoluton", "resolution"),
    ("crucialy", "crucially"),
    ("problematc", "problematic"),
    ("manuever", "maneuver"),
    ("specifc", "specific"),
    ("browswer", "browser"),
    ("instalation", "installation"),
    ("updat", "update"),
    ("utilisation", "utilization"),
    ("developement", "development"),
    ("performence", "performance"),
    ("requirment", "requirement"),
    ("admistrator", "administrator"),
    ("compatibile", "compatible"),
    ("configeration", "configuration"),
    ("credenitals", "credentials"),
    ("deafult", "default"),
    ("defualt", "default"),
    ("destop", "desktop"),
    ("disconect", "disconnect"),
    ("enviornment", "environment"),
    ("excute", "execute"),
    ("exeption", "exception"),
    ("explorerer", "explorer"),
    ("extention", "extension"),
    ("fuction", "function"),
    ("firewal", "firewall"),
    ("instal", "install"),
    ("instll", "install"),
    ("interace", "interface"),
    ("laptoppp", "laptop"),
    ("netwrk", "network"),
    ("permisson", "permission"),
    ("prefrences", "preferences"),
    ("protocal", "protocol"),
    ("publisch", "publish"),
    ("rebooot", "reboot"),
    ("rechage", "recharge"),
    ("resouces", "resources"),
    ("restablish", "reestablish"),
    ("scrool", "scroll"),
    ("setings", "settings"),
    ("softwere", "software"),
    ("syncronize", "synchronize"),
    ("uninstalll", "uninstall"),
    ("updatte", "update"),
    ("usser", "user"),
    ("utilites", "utilities"),
    ("virrus", "virus"),
    ("voulme", "volume"),
    ("warrning", "warning"),
    ("winows", "windows"),
    ("wirless", "wireless"),
    ("worksttion", "workstation"),
    ("applicaton", "application"),
    ("authenication", "authentication"),
    ("autorization", "authorization"),
    ("avialable", "available"),
    ("calibrateion", "calibration"),
    ("commmand", "command"),
    ("compability", "compatibility"),
    ("compresssion", "compression"),
    ("conectivity", "connectivity"),
    ("contoller", "controller"),
    ("creat", "create"),
    ("deteced", "detected"),
    ("diagnositic", "diagnostic"),
    ("docment", "document"),
    ("emeail", "email"),
    ("encrption", "encryption"),
    ("execcute", "execute"),
    ("firmare", "firmware"),
    ("initiallize", "initialize"),
    ("intgration", "integration"),
    ("intial", "initial"),
    ("loggging", "logging"),
    ("modfied", "modified"),
    ("perfrmance", "performance"),
    ("preformance", "performance"),
    ("proceessor", "processor"),
    ("registrtion", "registration"),
    ("reliablity", "reliability"),
    ("secirty", "security"),
    ("sofware", "software"),
    ("succesfuly", "successfully"),
    ("temprary", "temporary"),
    ("throughtput", "throughput"),
    ("tranfser", "transfer"),
    ("unresponsivee", "unresponsive"),
];

/// Immutable table of misspelling to correction.
#[derive(Debug, Clone)]
pub struct CorrectionMap {
    lookup: HashMap<SmolStr, SmolStr>,
    // distinct corrections in insertion order, searched by the nearest match
    corrections: Vec<SmolStr>,
}

impl CorrectionMap {
    /// Builds a table from `(misspelling, correction)` pairs. Misspellings
    /// are matched case-insensitively; the first pair for a misspelling wins.
    pub fn new<I, K, V>(pairs: I) -> CorrectionMap
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut lookup = HashMap::new();
        let mut corrections = Vec::new();

        for (misspelling, correction) in pairs {
            let key = lower_case(misspelling.as_ref().trim());
            let correction = SmolStr::from(correction.as_ref().trim());

            if key.is_empty() || correction.is_empty() {
                continue;
            }

            if let hashbrown::hash_map::Entry::Vacant(slot) = lookup.entry(key) {
                slot.insert(correction.clone());
                corrections.push(correction);
            }
        }

        CorrectionMap {
            lookup,
            corrections: corrections.into_iter().unique().collect(),
        }
    }

    /// Exact lookup, case-insensitive.
    pub fn get(&self, misspelling: &str) -> Option<&SmolStr> {
        self.lookup.get(&lower_case(misspelling))
    }

    /// Distinct corrections, in insertion order.
    pub fn corrections(&self) -> &[SmolStr] {
        &self.corrections
    }

    /// Number of misspellings held.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// Whether the map holds no misspellings.
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}

impl Default for CorrectionMap {
    fn default() -> Self {
        CorrectionMap::new(COMMON_MISSPELLINGS.iter().copied())
    }
}

/// Every adjacent transposition of `word`, then every single-character
/// deletion, without duplicates.
pub fn typo_variations(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();

    let swaps = (0..chars.len().saturating_sub(1)).map(|i| {
        let mut v = chars.clone();
        v.swap(i, i + 1);
        v.into_iter().collect::<String>()
    });

    let deletions = (0..chars.len()).map(|i| {
        chars
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, c)| *c)
            .collect::<String>()
    });

    swaps.chain(deletions).unique().collect()
}

/// Repairs single words against a [`CorrectionMap`].
#[derive(Debug, Clone)]
pub struct FallbackCorrector {
    map: CorrectionMap,
    threshold: usize,
}

impl Default for FallbackCorrector {
    fn default() -> Self {
        FallbackCorrector::new(CorrectionMap::default())
    }
}

impl FallbackCorrector {
    /// Uses [`DEFAULT_THRESHOLD`].
    pub fn new(map: CorrectionMap) -> FallbackCorrector {
        FallbackCorrector {
            map,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Sets the largest accepted edit distance.
    pub fn with_threshold(mut self, threshold: usize) -> FallbackCorrector {
        self.threshold = threshold;
        self
    }

    /// The table consulted by this corrector.
    pub fn map(&self) -> &CorrectionMap {
        &self.map
    }

    /// Largest accepted edit distance.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Best correction for a single word, or the word itself when nothing
    /// is within the threshold.
    pub fn correct(&self, word: &str) -> SmolStr {
        if word.is_empty() {
            return SmolStr::default();
        }

        if let Some(correction) = self.map.get(word) {
            return correction.clone();
        }

        match self.nearest(&lower_case(word)) {
            Some((correction, distance)) if distance <= self.threshold => {
                log::trace!("'{}' -> '{}' (distance {})", word, correction, distance);
                correction.clone()
            }
            _ => SmolStr::from(word),
        }
    }

    /// The correction closest to any typo variation of `word`, with its
    /// distance. The first correction reaching the minimum wins.
    fn nearest(&self, word: &str) -> Option<(&SmolStr, usize)> {
        let mut best: Option<(&SmolStr, usize)> = None;

        for variation in typo_variations(word) {
            for correction in self.map.corrections() {
                let distance = levenshtein(&variation, correction);

                if best.map_or(true, |(_, d)| distance < d) {
                    best = Some((correction, distance));

                    if distance == 0 {
                        return best;
                    }
                }
            }
        }

        best
    }

    /// Whole-sentence batch mode: corrects each space-separated word on its
    /// own, with no context.
    pub fn correct_text(&self, input: &str) -> String {
        input
            .split(' ')
            .map(|word| self.correct(word))
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variations() {
        assert_eq!(
            typo_variations("abc"),
            vec!["bac", "acb", "bc", "ac", "ab"]
        );
        assert_eq!(typo_variations("aa"), vec!["aa", "a"]);
        assert_eq!(typo_variations("x"), vec![""]);
        assert!(typo_variations("").is_empty());
    }

    #[test]
    fn exact_match() {
        let corrector = FallbackCorrector::default();
        assert_eq!(corrector.correct("recieve"), "receive");
        assert_eq!(corrector.correct("Teh"), "the");
        assert_eq!(corrector.correct("ALOT"), "a lot");
    }

    #[test]
    fn no_close_match() {
        let corrector = FallbackCorrector::default();
        assert_eq!(corrector.correct("xyzxyz"), "xyzxyz");
        assert_eq!(corrector.correct(""), "");
    }

    #[test]
    fn transposed_typo() {
        let corrector = FallbackCorrector::default();
        // swapping "vi" gives "receive" exactly
        assert_eq!(corrector.correct("recevie"), "receive");
        assert_eq!(corrector.correct("netwrok"), "network");
    }

    #[test]
    fn threshold_is_respected() {
        let map = CorrectionMap::new(vec![("wierd", "weird")]);
        let loose = FallbackCorrector::new(map.clone());
        let strict = FallbackCorrector::new(map).with_threshold(0);

        // "weirdos" -> deletion "weirds" is 1 away from "weird"
        assert_eq!(loose.correct("weirdos"), "weird");
        assert_eq!(strict.correct("weirdos"), "weirdos");
    }

    #[test]
    fn map_is_case_insensitive_and_first_wins() {
        let map = CorrectionMap::new(vec![("Teh", "the"), ("teh", "tea"), ("", "x")]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("TEH").map(|s| s.as_str()), Some("the"));
        assert_eq!(map.corrections(), &["the"]);
    }

    #[test]
    fn batch_mode() {
        let corrector = FallbackCorrector::default();
        assert_eq!(
            corrector.correct_text("teh softwere updatte"),
            "the software update"
        );
    }
}
