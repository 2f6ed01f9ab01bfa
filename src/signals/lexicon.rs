//! 英語の感情辞書（形容詞中心）。
//!
//! 各エントリは (語, 極性 [-1, 1], 主観性 [0, 1])。

pub(crate) const SENTIMENT_LEXICON: &[(&str, f64, f64)] = &[
    ("absurd", -0.5, 1.0),
    ("alarming", -0.6, 0.9),
    ("amazing", 0.6, 0.9),
    ("angry", -0.5, 1.0),
    ("annoying", -0.8, 0.9),
    ("anxious", -0.25, 0.75),
    ("astonishing", 0.5, 0.9),
    ("awesome", 1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.667),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("bizarre", -0.25, 0.75),
    ("bleak", -0.4, 0.7),
    ("bold", 0.3, 0.6),
    ("boring", -1.0, 1.0),
    ("brave", 0.8, 1.0),
    ("brilliant", 0.9, 1.0),
    ("brutal", -0.875, 1.0),
    ("calm", 0.3, 0.75),
    ("catastrophic", -1.0, 1.0),
    ("chaotic", -0.6, 0.8),
    ("cheap", 0.4, 0.7),
    ("clear", 0.1, 0.383),
    ("controversial", -0.2, 0.7),
    ("cool", 0.35, 0.65),
    ("corrupt", -0.7, 0.9),
    ("crazy", -0.6, 0.9),
    ("critical", -0.1, 0.8),
    ("cruel", -1.0, 1.0),
    ("dangerous", -0.6, 0.9),
    ("dark", -0.15, 0.4),
    ("deadly", -0.6, 0.8),
    ("delighted", 0.7, 1.0),
    ("devastating", -0.8, 0.9),
    ("difficult", -0.5, 1.0),
    ("dire", -0.7, 0.8),
    ("disappointing", -0.6, 0.7),
    ("disastrous", -1.0, 1.0),
    ("disgusting", -1.0, 1.0),
    ("dramatic", -0.1, 0.85),
    ("easy", 0.433, 0.833),
    ("effective", 0.6, 0.8),
    ("embarrassing", -0.6, 0.9),
    ("epic", 0.5, 0.7),
    ("excellent", 1.0, 1.0),
    ("exciting", 0.3, 0.8),
    ("extraordinary", 0.4, 0.75),
    ("fair", 0.7, 0.9),
    ("fake", -0.5, 1.0),
    ("false", -0.4, 0.6),
    ("famous", 0.5, 0.833),
    ("fantastic", 0.4, 0.9),
    ("fatal", -0.6, 0.9),
    ("fearful", -0.4, 0.8),
    ("fierce", -0.3, 0.7),
    ("fine", 0.417, 0.5),
    ("fortunate", 0.5, 0.8),
    ("free", 0.4, 0.8),
    ("funny", 0.25, 0.75),
    ("glad", 0.5, 1.0),
    ("good", 0.7, 0.6),
    ("gorgeous", 0.7, 1.0),
    ("great", 0.8, 0.75),
    ("grim", -0.5, 0.8),
    ("happy", 0.8, 1.0),
    ("hard", -0.292, 0.542),
    ("harmful", -0.5, 0.8),
    ("heartbreaking", -0.8, 1.0),
    ("heroic", 0.7, 0.9),
    ("historic", 0.2, 0.5),
    ("hopeful", 0.4, 0.8),
    ("horrible", -1.0, 1.0),
    ("horrific", -1.0, 1.0),
    ("huge", 0.4, 0.9),
    ("ideal", 0.9, 0.9),
    ("illegal", -0.5, 0.5),
    ("important", 0.4, 1.0),
    ("impossible", -0.667, 1.0),
    ("impressive", 1.0, 1.0),
    ("incredible", 0.9, 0.9),
    ("innovative", 0.5, 0.75),
    ("insane", -0.5, 1.0),
    ("interesting", 0.5, 0.5),
    ("lucky", 0.333, 1.0),
    ("magnificent", 1.0, 1.0),
    ("major", 0.063, 0.5),
    ("massive", 0.0, 1.0),
    ("miserable", -1.0, 1.0),
    ("mysterious", -0.1, 0.8),
    ("nasty", -1.0, 1.0),
    ("negative", -0.3, 0.4),
    ("new", 0.136, 0.455),
    ("nice", 0.6, 1.0),
    ("outrageous", -0.8, 1.0),
    ("outstanding", 0.5, 0.5),
    ("painful", -0.7, 0.9),
    ("peaceful", 0.5, 0.8),
    ("perfect", 1.0, 1.0),
    ("pleasant", 0.733, 0.967),
    ("poor", -0.4, 0.6),
    ("popular", 0.6, 0.8),
    ("positive", 0.227, 0.545),
    ("powerful", 0.3, 1.0),
    ("proud", 0.8, 1.0),
    ("questionable", -0.3, 0.7),
    ("rare", 0.3, 0.9),
    ("remarkable", 0.75, 0.75),
    ("ridiculous", -0.333, 1.0),
    ("risky", -0.4, 0.8),
    ("sad", -0.5, 1.0),
    ("safe", 0.5, 0.5),
    ("scandalous", -0.7, 0.9),
    ("scary", -0.5, 1.0),
    ("serious", -0.333, 0.667),
    ("severe", -0.5, 0.8),
    ("shameful", -0.8, 1.0),
    ("shocking", -1.0, 1.0),
    ("sick", -0.714, 0.857),
    ("smart", 0.214, 0.643),
    ("spectacular", 0.6, 0.8),
    ("strange", 0.0, 0.15),
    ("strong", 0.433, 0.733),
    ("stunning", 0.5, 1.0),
    ("stupid", -0.8, 1.0),
    ("successful", 0.75, 0.95),
    ("superb", 1.0, 1.0),
    ("surprising", 0.5, 0.8),
    ("suspicious", -0.4, 0.8),
    ("terrible", -1.0, 1.0),
    ("terrific", 1.0, 1.0),
    ("thrilling", 0.6, 0.8),
    ("tragic", -0.75, 1.0),
    ("troubling", -0.5, 0.8),
    ("true", 0.35, 0.65),
    ("ugly", -0.7, 1.0),
    ("unacceptable", -0.8, 0.9),
    ("unbelievable", 0.1, 0.9),
    ("unfair", -0.5, 0.9),
    ("unfortunate", -0.5, 0.8),
    ("unprecedented", 0.2, 0.6),
    ("unsafe", -0.5, 0.8),
    ("upset", -0.4, 0.9),
    ("useful", 0.3, 0.0),
    ("useless", -0.5, 0.2),
    ("violent", -0.8, 0.9),
    ("weak", -0.375, 0.625),
    ("weird", -0.5, 1.0),
    ("wonderful", 1.0, 1.0),
    ("worried", -0.3, 0.8),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("wrong", -0.5, 0.9),
];

/// 直後の評価語を強める副詞と倍率。
pub(crate) const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5),
    ("completely", 1.4),
    ("deeply", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.5),
    ("most", 1.3),
    ("quite", 1.1),
    ("really", 1.3),
    ("so", 1.2),
    ("too", 1.2),
    ("totally", 1.4),
    ("truly", 1.3),
    ("very", 1.3),
];

pub(crate) const NEGATIONS: &[&str] = &["hardly", "never", "no", "nor", "not", "without"];

/// 否定・強調の効果を途切れさせない語。
pub(crate) const TRANSPARENT_WORDS: &[&str] = &["a", "an", "the", "be", "been", "is", "was"];
