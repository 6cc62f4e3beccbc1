//! Animation Catalog — the closed vocabulary of animation clip names.
//!
//! Names match the clip ids shipped with the front-end player, including the
//! few that contain spaces (`"hands on hips"`). Categories only group the
//! names for humans and for prompt rendering; nothing branches on them.

use std::collections::HashSet;
use std::sync::LazyLock;

// ── Categories ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCategory {
    Face,
    IndianDances,
    MemeBeats,
    UpperBody,
    General,
}

impl AnimationCategory {
    pub fn label(&self) -> &'static str {
        match self {
            AnimationCategory::Face => "faceAnimation",
            AnimationCategory::IndianDances => "indianDances",
            AnimationCategory::MemeBeats => "memeBeats",
            AnimationCategory::UpperBody => "UpperBodyBits",
            AnimationCategory::General => "general",
        }
    }
}

const FACE: &[&str] = &[
    "blush", "blush2", "cringe", "deadpan", "eyeRoll", "gasp", "gigaGrin", "grinLaughing",
    "mindBlown", "moneyEye", "pleading", "rage", "rage2", "side-eye", "smirk", "surprise",
    "suspicious", "sweat", "uglyCry", "villain-grin",
];

const INDIAN_DANCES: &[&str] = &[
    "classicalDance", "indianDance2", "panjabaiDance2", "panjabiDance", "panjabiNew",
    "panjabiNew2", "rrrDance", "rrrDance1", "rrrDance2", "rrrDance3", "thumka", "thumka2",
    "vickyKaushalDance", "vickyKaushalDance2",
];

const MEME_BEATS: &[&str] = &[
    "dramaticCollapse", "faint", "headBang", "Kneel", "moonwalk", "stomp", "tipToe", "Tpose",
    "victoryJump",
];

const UPPER_BODY: &[&str] = &[
    "airQuotes", "backFlipCartwheel", "claping", "claping2", "dab", "DanceWithMicrophone",
    "facepalm", "facepalmBothHand", "fingerWag", "fistPump", "foreheadWipe", "hands on hips",
    "jazz hands", "micDrop", "point", "point2", "pointDouble", "rapping", "shrug", "strut2",
];

// "surprise" also appears under Face; the catalog keeps the first occurrence.
const GENERAL: &[&str] = &[
    "angereffect", "aura farmer", "backFlip", "ballDribling", "ball kick", "block",
    "blockCrouch", "busketball", "busketBallThrow", "catchRun", "catchRun2", "chefsKiss",
    "comeHere", "crawl", "crawlBackwards", "cryingeffect", "dance", "dance2", "danceEmote",
    "duck", "eat", "embarrassed", "fairyFly", "fairyFlyWithwandWave", "fallPose", "fallPose2",
    "flyHorizontalSuperman", "flySuperman", "Hadokun", "hardHit", "hip Twist", "idle", "jump",
    "jumpInplace", "kick", "kickingBallWithLeft", "KickingBallWithRight", "kickJumping",
    "kickSitting", "kickSitting2", "knockOver", "laughing2", "laughingEffect", "leaningforward",
    "lightHit", "moneySplash", "moneyThrow", "punchJumping", "punch jumping",
    "punchJumpingInplace", "punchLeftHook", "punchRightHook", "punchSitting", "recover", "run",
    "runBackwards", "scaredRun", "scaredRun2", "sleeping", "sleepStanding", "surprise",
    "talkingeffect", "twerk", "upperCut", "walk", "walkBackwards",
];

const CATEGORIES: &[(AnimationCategory, &[&str])] = &[
    (AnimationCategory::Face, FACE),
    (AnimationCategory::IndianDances, INDIAN_DANCES),
    (AnimationCategory::MemeBeats, MEME_BEATS),
    (AnimationCategory::UpperBody, UPPER_BODY),
    (AnimationCategory::General, GENERAL),
];

/// The name every fallback sequence is built from.
pub const IDLE: &str = "idle";

// ── Catalog ────────────────────────────────────────────

/// Deduplicated, immutable set of legal animation names.
#[derive(Debug)]
pub struct AnimationCatalog {
    /// Documentation order (category by category), duplicates removed.
    ordered: Vec<&'static str>,
    lookup: HashSet<&'static str>,
}

static CATALOG: LazyLock<AnimationCatalog> = LazyLock::new(AnimationCatalog::build);

impl AnimationCatalog {
    /// The process-wide catalog, built on first access.
    pub fn global() -> &'static AnimationCatalog {
        &CATALOG
    }

    fn build() -> Self {
        let mut ordered = Vec::new();
        let mut lookup = HashSet::new();
        for (_, names) in CATEGORIES {
            for name in names.iter().copied() {
                if lookup.insert(name) {
                    ordered.push(name);
                }
            }
        }
        Self { ordered, lookup }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }

    /// Every name, category by category.
    pub fn names(&self) -> &[&'static str] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Raw category listing (may repeat a name across categories).
    pub fn categories(&self) -> impl Iterator<Item = (AnimationCategory, &'static [&'static str])> {
        CATEGORIES.iter().copied()
    }

    /// Comma-separated rendering used inside the model instruction.
    pub fn render_list(&self) -> String {
        self.ordered.join(", ")
    }
}
