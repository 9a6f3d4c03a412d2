//! Bundled verse translation presets.
//!
//! Three full translation tables ship with the crate (NKJV, CSB, ESV); every
//! table covers the same key set as [`crate::corpus::CORPUS_KEYS`]. NKJV is
//! the default-translation table the fallback chain bottoms out on.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::corpus::{display_reference, Translation, Verse};

fn build_table(
    translation: Translation,
    texts: &[(&'static str, &'static str)],
) -> HashMap<&'static str, Verse> {
    texts
        .iter()
        .map(|(key, text)| {
            let reference = display_reference(key).unwrap_or(key);
            (
                *key,
                Verse {
                    text: (*text).to_string(),
                    reference: reference.to_string(),
                    version: translation.as_str().to_string(),
                },
            )
        })
        .collect()
}

const NKJV_TEXTS: &[(&str, &str)] = &[
    ("1cor-3:23", "And you are of Christ, and Christ is of God."),
    (
        "1cor-10:31",
        "Therefore, whether you eat or drink, or whatever you do, do all to the glory of God.",
    ),
    (
        "1cor-13:4-7",
        "Love suffers long and is kind; love does not envy; love does not parade itself, is not puffed up; does not behave rudely, does not seek its own, is not provoked, thinks no evil; does not rejoice in iniquity, but rejoices in the truth; bears all things, believes all things, hopes all things, endures all things.",
    ),
    ("phil-4:13", "I can do all things through Christ who strengthens me."),
    (
        "phil-4:6-7",
        "Be anxious for nothing, but in everything by prayer and supplication, with thanksgiving, let your requests be made known to God; and the peace of God, which surpasses all understanding, will guard your hearts and minds through Christ Jesus.",
    ),
    (
        "prov-3:5-6",
        "Trust in the LORD with all your heart, and lean not on your own understanding; in all your ways acknowledge Him, and He shall direct your paths.",
    ),
    (
        "prov-16:3",
        "Commit your works to the LORD, and your thoughts will be established.",
    ),
    (
        "prov-18:10",
        "The name of the LORD is a strong tower; the righteous run to it and are safe.",
    ),
    ("ps-23:1", "The LORD is my shepherd; I shall not want."),
    (
        "ps-46:1",
        "God is our refuge and strength, a very present help in trouble.",
    ),
    ("ps-119:105", "Your word is a lamp to my feet and a light to my path."),
    (
        "john-3:16",
        "For God so loved the world that He gave His only begotten Son, that whoever believes in Him should not perish but have everlasting life.",
    ),
    (
        "john-14:6",
        "Jesus said to him, \"I am the way, the truth, and the life. No one comes to the Father except through Me.\"",
    ),
    (
        "rom-8:28",
        "And we know that all things work together for good to those who love God, to those who are the called according to His purpose.",
    ),
    (
        "rom-12:2",
        "And do not be conformed to this world, but be transformed by the renewing of your mind, that you may prove what is that good and acceptable and perfect will of God.",
    ),
    (
        "jer-29:11",
        "For I know the thoughts that I think toward you, says the LORD, thoughts of peace and not of evil, to give you a future and a hope.",
    ),
    (
        "matt-28:19-20",
        "Go therefore and make disciples of all the nations, baptizing them in the name of the Father and of the Son and of the Holy Spirit, teaching them to observe all things that I have commanded you; and lo, I am with you always, even to the end of the age.",
    ),
    (
        "1thess-5:16-18",
        "Rejoice always, pray without ceasing, in everything give thanks; for this is the will of God in Christ Jesus for you.",
    ),
];

const CSB_TEXTS: &[(&str, &str)] = &[
    ("1cor-3:23", "You belong to Christ, and Christ belongs to God."),
    (
        "1cor-10:31",
        "So, whether you eat or drink, or whatever you do, do everything for the glory of God.",
    ),
    (
        "1cor-13:4-7",
        "Love is patient, love is kind. Love does not envy, is not boastful, is not arrogant, is not rude, is not self-seeking, is not irritable, and does not keep a record of wrongs. Love finds no joy in unrighteousness but rejoices in the truth. It bears all things, believes all things, hopes all things, endures all things.",
    ),
    ("phil-4:13", "I am able to do all things through him who strengthens me."),
    (
        "phil-4:6-7",
        "Don't worry about anything, but in everything, through prayer and petition with thanksgiving, present your requests to God. And the peace of God, which surpasses all understanding, will guard your hearts and minds in Christ Jesus.",
    ),
    (
        "prov-3:5-6",
        "Trust in the LORD with all your heart, and do not rely on your own understanding; in all your ways know him, and he will make your paths straight.",
    ),
    (
        "prov-16:3",
        "Commit your activities to the LORD, and your plans will be established.",
    ),
    (
        "prov-18:10",
        "The name of the LORD is a strong tower; the righteous run to it and are protected.",
    ),
    ("ps-23:1", "The LORD is my shepherd; I have what I need."),
    (
        "ps-46:1",
        "God is our refuge and strength, a helper who is always found in times of trouble.",
    ),
    ("ps-119:105", "Your word is a lamp for my feet and a light on my path."),
    (
        "john-3:16",
        "For God loved the world in this way: He gave his one and only Son, so that everyone who believes in him will not perish but have eternal life.",
    ),
    (
        "john-14:6",
        "Jesus told him, \"I am the way, the truth, and the life. No one comes to the Father except through me.\"",
    ),
    (
        "rom-8:28",
        "We know that all things work together for the good of those who love God, who are called according to his purpose.",
    ),
    (
        "rom-12:2",
        "Do not be conformed to this age, but be transformed by the renewing of your mind, so that you may discern what is the good, pleasing, and perfect will of God.",
    ),
    (
        "jer-29:11",
        "For I know the plans I have for you - this is the LORD's declaration - plans for your well-being, not for disaster, to give you a future and a hope.",
    ),
    (
        "matt-28:19-20",
        "Go, therefore, and make disciples of all nations, baptizing them in the name of the Father and of the Son and of the Holy Spirit, teaching them to observe everything I have commanded you. And remember, I am with you always, to the end of the age.",
    ),
    (
        "1thess-5:16-18",
        "Rejoice always, pray constantly, give thanks in everything; for this is God's will for you in Christ Jesus.",
    ),
];

const ESV_TEXTS: &[(&str, &str)] = &[
    ("1cor-3:23", "And you are Christ's, and Christ is God's."),
    (
        "1cor-10:31",
        "So, whether you eat or drink, or whatever you do, do all to the glory of God.",
    ),
    (
        "1cor-13:4-7",
        "Love is patient and kind; love does not envy or boast; it is not arrogant or rude. It does not insist on its own way; it is not irritable or resentful; it does not rejoice at wrongdoing, but rejoices with the truth. Love bears all things, believes all things, hopes all things, endures all things.",
    ),
    ("phil-4:13", "I can do all things through him who strengthens me."),
    (
        "phil-4:6-7",
        "Do not be anxious about anything, but in everything by prayer and supplication with thanksgiving let your requests be made known to God. And the peace of God, which surpasses all understanding, will guard your hearts and your minds in Christ Jesus.",
    ),
    (
        "prov-3:5-6",
        "Trust in the LORD with all your heart, and do not lean on your own understanding. In all your ways acknowledge him, and he will make straight your paths.",
    ),
    (
        "prov-16:3",
        "Commit your work to the LORD, and your plans will be established.",
    ),
    (
        "prov-18:10",
        "The name of the LORD is a strong tower; the righteous man runs into it and is safe.",
    ),
    ("ps-23:1", "The LORD is my shepherd; I shall not want."),
    (
        "ps-46:1",
        "God is our refuge and strength, a very present help in trouble.",
    ),
    ("ps-119:105", "Your word is a lamp to my feet and a light to my path."),
    (
        "john-3:16",
        "For God so loved the world, that he gave his only Son, that whoever believes in him should not perish but have eternal life.",
    ),
    (
        "john-14:6",
        "Jesus said to him, \"I am the way, and the truth, and the life. No one comes to the Father except through me.\"",
    ),
    (
        "rom-8:28",
        "And we know that for those who love God all things work together for good, for those who are called according to his purpose.",
    ),
    (
        "rom-12:2",
        "Do not be conformed to this world, but be transformed by the renewal of your mind, that by testing you may discern what is the will of God, what is good and acceptable and perfect.",
    ),
    (
        "jer-29:11",
        "For I know the plans I have for you, declares the LORD, plans for welfare and not for evil, to give you a future and a hope.",
    ),
    (
        "matt-28:19-20",
        "Go therefore and make disciples of all nations, baptizing them in the name of the Father and of the Son and of the Holy Spirit, teaching them to observe all that I have commanded you. And behold, I am with you always, to the end of the age.",
    ),
    (
        "1thess-5:16-18",
        "Rejoice always, pray without ceasing, give thanks in all circumstances; for this is the will of God in Christ Jesus for you.",
    ),
];

static NKJV_VERSES: Lazy<HashMap<&'static str, Verse>> =
    Lazy::new(|| build_table(Translation::Nkjv, NKJV_TEXTS));
static CSB_VERSES: Lazy<HashMap<&'static str, Verse>> =
    Lazy::new(|| build_table(Translation::Csb, CSB_TEXTS));
static ESV_VERSES: Lazy<HashMap<&'static str, Verse>> =
    Lazy::new(|| build_table(Translation::Esv, ESV_TEXTS));

/// Preset table for a bundled translation; `None` for translations that only
/// resolve remotely.
pub fn preset_verses(translation: Translation) -> Option<&'static HashMap<&'static str, Verse>> {
    match translation {
        Translation::Nkjv => Some(&NKJV_VERSES),
        Translation::Csb => Some(&CSB_VERSES),
        Translation::Esv => Some(&ESV_VERSES),
        _ => None,
    }
}

/// Look up a verse in a bundled preset table.
pub fn preset_verse(translation: Translation, key: &str) -> Option<Verse> {
    preset_verses(translation)?.get(key).cloned()
}

/// Default-translation entry for `key`; the final tier of the fallback
/// chain. `None` only for keys outside the static corpus.
pub fn default_verse(key: &str) -> Option<Verse> {
    NKJV_VERSES.get(key).cloned()
}
