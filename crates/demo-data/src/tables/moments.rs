//! Classroom moment templates, topics, captions and comment phrases.
//!
//! Titles and contents contain a `{topic}` placeholder. Each topic is one
//! English/Hindi pair so both languages are always filled from the same entry.

use school::models::MomentType;

use super::Pair;

#[derive(Debug, Clone, Copy)]
pub struct MomentTemplate {
    pub title: Pair,
    pub content: Pair,
}

const fn t(title: Pair, content: Pair) -> MomentTemplate {
    MomentTemplate { title, content }
}

/// Used for any moment type without registered templates.
pub const FALLBACK_TEMPLATE: MomentTemplate = t(
    ("Classroom Moment: {topic}", "कक्षा का पल: {topic}"),
    (
        "Our class shared a wonderful moment today around {topic}.",
        "आज हमारी कक्षा ने {topic} के साथ एक अद्भुत पल साझा किया।",
    ),
);

const LEARNING: &[MomentTemplate] = &[
    t(
        ("Exploring {topic}", "{topic} की खोज"),
        (
            "Students worked in pairs to understand {topic} with hands-on examples.",
            "विद्यार्थियों ने जोड़ियों में काम करके उदाहरणों के साथ {topic} को समझा।",
        ),
    ),
    t(
        ("Today's lesson: {topic}", "आज का पाठ: {topic}"),
        (
            "A lively discussion on {topic} with lots of great questions.",
            "{topic} पर ढेर सारे अच्छे प्रश्नों के साथ जीवंत चर्चा हुई।",
        ),
    ),
];

const ART: &[MomentTemplate] = &[t(
    ("Art corner: {topic}", "कला कोना: {topic}"),
    (
        "Little artists brought {topic} to life with colours and imagination.",
        "नन्हे कलाकारों ने रंगों और कल्पना से {topic} को जीवंत कर दिया।",
    ),
)];

const SPORTS: &[MomentTemplate] = &[
    t(
        ("Game day: {topic}", "खेल दिवस: {topic}"),
        (
            "Great teamwork and energy on the field during {topic}.",
            "{topic} के दौरान मैदान पर शानदार टीमवर्क और ऊर्जा दिखी।",
        ),
    ),
    t(
        ("Practice session: {topic}", "अभ्यास सत्र: {topic}"),
        (
            "Everyone pushed their limits in today's {topic} practice.",
            "आज के {topic} अभ्यास में सभी ने अपनी पूरी ताकत लगाई।",
        ),
    ),
];

const CELEBRATION: &[MomentTemplate] = &[t(
    ("Celebrating {topic}", "{topic} का उत्सव"),
    (
        "The classroom was full of joy as we celebrated {topic} together.",
        "हमने साथ मिलकर {topic} मनाया और कक्षा खुशियों से भर गई।",
    ),
)];

const FIELD_TRIP: &[MomentTemplate] = &[t(
    ("Field trip to {topic}", "{topic} की शैक्षिक यात्रा"),
    (
        "Students learned outside the classroom on our visit to {topic}.",
        "{topic} की यात्रा में विद्यार्थियों ने कक्षा के बाहर सीखा।",
    ),
)];

const ACHIEVEMENT: &[MomentTemplate] = &[t(
    ("Proud moment: {topic}", "गर्व का पल: {topic}"),
    (
        "Congratulations to our students for their success in {topic}!",
        "{topic} में सफलता के लिए हमारे विद्यार्थियों को बधाई!",
    ),
)];

const SCIENCE: &[MomentTemplate] = &[t(
    ("Science lab: {topic}", "विज्ञान प्रयोगशाला: {topic}"),
    (
        "Curious minds ran their own experiment on {topic} today.",
        "जिज्ञासु विद्यार्थियों ने आज {topic} पर स्वयं प्रयोग किया।",
    ),
)];

/// Templates registered for a moment type. Empty when the type has none.
pub fn templates_for(kind: MomentType) -> &'static [MomentTemplate] {
    match kind {
        MomentType::Learning => LEARNING,
        MomentType::Art => ART,
        MomentType::Sports => SPORTS,
        MomentType::Celebration => CELEBRATION,
        MomentType::FieldTrip => FIELD_TRIP,
        MomentType::Achievement => ACHIEVEMENT,
        MomentType::Science => SCIENCE,
        MomentType::Music | MomentType::Reading => &[],
    }
}

const LEARNING_TOPICS: &[Pair] = &[
    ("fractions", "भिन्न"),
    ("the water cycle", "जल चक्र"),
    ("map reading", "नक्शा पढ़ना"),
    ("multiplication tables", "पहाड़े"),
];

const ART_TOPICS: &[Pair] = &[
    ("Madhubani painting", "मधुबनी चित्रकला"),
    ("clay modelling", "मिट्टी के खिलौने"),
    ("rangoli patterns", "रंगोली"),
];

const SPORTS_TOPICS: &[Pair] = &[
    ("kabaddi", "कबड्डी"),
    ("cricket", "क्रिकेट"),
    ("relay races", "रिले दौड़"),
];

const CELEBRATION_TOPICS: &[Pair] = &[
    ("Diwali", "दीवाली"),
    ("Independence Day", "स्वतंत्रता दिवस"),
    ("Children's Day", "बाल दिवस"),
];

const FIELD_TRIP_TOPICS: &[Pair] = &[
    ("the science museum", "विज्ञान संग्रहालय"),
    ("the zoo", "चिड़ियाघर"),
    ("a local farm", "पास का खेत"),
];

const ACHIEVEMENT_TOPICS: &[Pair] = &[
    ("the inter-school quiz", "अंतर-विद्यालय प्रश्नोत्तरी"),
    ("the spelling bee", "वर्तनी प्रतियोगिता"),
    ("the science fair", "विज्ञान मेला"),
];

const SCIENCE_TOPICS: &[Pair] = &[
    ("magnets", "चुंबक"),
    ("plant growth", "पौधों की वृद्धि"),
    ("the solar system", "सौरमंडल"),
];

const GENERAL_TOPICS: &[Pair] = &[
    ("teamwork", "टीमवर्क"),
    ("music class", "संगीत कक्षा"),
    ("story time", "कहानी का समय"),
    ("our reading corner", "हमारा पठन कोना"),
];

/// Topics for a moment type, falling back to a general bank.
pub fn topics_for(kind: MomentType) -> &'static [Pair] {
    match kind {
        MomentType::Learning => LEARNING_TOPICS,
        MomentType::Art => ART_TOPICS,
        MomentType::Sports => SPORTS_TOPICS,
        MomentType::Celebration => CELEBRATION_TOPICS,
        MomentType::FieldTrip => FIELD_TRIP_TOPICS,
        MomentType::Achievement => ACHIEVEMENT_TOPICS,
        MomentType::Science => SCIENCE_TOPICS,
        MomentType::Music | MomentType::Reading => GENERAL_TOPICS,
    }
}

pub const MEDIA_CAPTIONS: &[Pair] = &[
    ("Hard at work", "मेहनत जारी है"),
    ("All smiles", "मुस्कुराते चेहरे"),
    ("Teamwork in action", "टीमवर्क"),
    ("A moment to remember", "यादगार पल"),
    ("Our finished work", "हमारा पूरा काम"),
];

pub const COMMENT_PHRASES: &[Pair] = &[
    ("Wonderful to see!", "देखकर बहुत अच्छा लगा!"),
    ("Thank you for sharing!", "साझा करने के लिए धन्यवाद!"),
    ("So proud of the kids!", "बच्चों पर बहुत गर्व है!"),
    ("My child loved this activity.", "मेरे बच्चे को यह गतिविधि बहुत पसंद आई।"),
    ("Great initiative by the teachers.", "शिक्षकों की बढ़िया पहल।"),
    ("Looking forward to more!", "और का इंतज़ार रहेगा!"),
];
