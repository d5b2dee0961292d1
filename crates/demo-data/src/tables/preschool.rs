//! Preschool activity, observation and report wording.

use school::models::{NarrativeBand, PreschoolActivityType};

use super::Pair;

/// Title and description for an activity type.
pub fn activity_text(kind: PreschoolActivityType) -> (Pair, Pair) {
    match kind {
        PreschoolActivityType::CircleTime => (
            ("Morning Circle Time", "सुबह का घेरा समय"),
            (
                "Children greeted each other and shared something about their day.",
                "बच्चों ने एक-दूसरे का अभिवादन किया और अपने दिन के बारे में बताया।",
            ),
        ),
        PreschoolActivityType::ArtAndCraft => (
            ("Paper Plate Animals", "कागज़ की प्लेट से जानवर"),
            (
                "We cut, glued and coloured our favourite animals.",
                "हमने अपने पसंदीदा जानवर काटे, चिपकाए और रंगे।",
            ),
        ),
        PreschoolActivityType::Storytelling => (
            ("Story of the Thirsty Crow", "प्यासे कौवे की कहानी"),
            (
                "Children listened and retold the story in their own words.",
                "बच्चों ने कहानी सुनी और अपने शब्दों में दोहराई।",
            ),
        ),
        PreschoolActivityType::MusicAndMovement => (
            ("Dance and Freeze", "नाचो और रुको"),
            (
                "Moving to the music and freezing when it stopped.",
                "संगीत पर थिरकना और संगीत रुकते ही रुक जाना।",
            ),
        ),
        PreschoolActivityType::OutdoorPlay => (
            ("Playground Games", "खेल के मैदान में खेल"),
            (
                "Running, climbing and taking turns on the slide.",
                "दौड़ना, चढ़ना और बारी-बारी से फिसलपट्टी पर जाना।",
            ),
        ),
        PreschoolActivityType::SensoryPlay => (
            ("Sand and Water Play", "रेत और पानी का खेल"),
            (
                "Exploring textures by pouring, scooping and squeezing.",
                "डालकर, भरकर और दबाकर अलग-अलग बनावट की खोज।",
            ),
        ),
        PreschoolActivityType::BlockBuilding => (
            ("Tallest Tower Challenge", "सबसे ऊँची मीनार"),
            (
                "Building towers together and counting the blocks.",
                "मिलकर मीनार बनाना और ब्लॉक गिनना।",
            ),
        ),
        PreschoolActivityType::PretendPlay => (
            ("Our Little Market", "हमारा छोटा बाज़ार"),
            (
                "Children played shopkeepers and customers.",
                "बच्चों ने दुकानदार और ग्राहक बनकर खेला।",
            ),
        ),
        PreschoolActivityType::Puzzles => (
            ("Shape Puzzles", "आकृतियों की पहेली"),
            (
                "Matching shapes and completing picture puzzles.",
                "आकृतियों का मिलान और चित्र पहेलियाँ पूरी करना।",
            ),
        ),
        PreschoolActivityType::NatureWalk => (
            ("Garden Nature Walk", "बगीचे में प्रकृति सैर"),
            (
                "Collecting leaves and spotting insects in the school garden.",
                "स्कूल के बगीचे में पत्तियाँ इकट्ठा करना और कीड़े देखना।",
            ),
        ),
        PreschoolActivityType::Rhymes => (
            ("Rhyme Time", "कविता का समय"),
            (
                "Singing rhymes with actions in English and Hindi.",
                "अंग्रेज़ी और हिंदी में हाव-भाव के साथ कविताएँ गाना।",
            ),
        ),
    }
}

pub const OBSERVATION_NOTES: &[Pair] = &[
    (
        "Showed patience while waiting for a turn.",
        "अपनी बारी का इंतज़ार धैर्य से किया।",
    ),
    (
        "Used new words to describe a picture.",
        "चित्र का वर्णन करने के लिए नए शब्दों का प्रयोग किया।",
    ),
    (
        "Helped a friend without being asked.",
        "बिना कहे एक दोस्त की मदद की।",
    ),
    (
        "Held the crayon with a confident grip.",
        "क्रेयॉन को आत्मविश्वास से पकड़ा।",
    ),
    (
        "Sorted objects by colour and size.",
        "वस्तुओं को रंग और आकार के अनुसार छाँटा।",
    ),
    (
        "Expressed feelings calmly when upset.",
        "परेशान होने पर भी भावनाएँ शांति से व्यक्त कीं।",
    ),
];

/// Narrative for a domain in a band. Contains a `{domain}` placeholder.
pub fn narrative_template(band: NarrativeBand) -> Pair {
    match band {
        NarrativeBand::Emerging => (
            "Is beginning to build {domain} skills and benefits from guided practice.",
            "{domain} कौशल विकसित करना शुरू कर रहा है और मार्गदर्शित अभ्यास से लाभ पाता है।",
        ),
        NarrativeBand::Developing => (
            "Is making steady progress in {domain} development.",
            "{domain} विकास में लगातार प्रगति कर रहा है।",
        ),
        NarrativeBand::Excelling => (
            "Shows confident, age-appropriate mastery of {domain} skills.",
            "{domain} कौशल में आत्मविश्वासपूर्ण और आयु-उपयुक्त दक्षता दिखाता है।",
        ),
    }
}

/// Contains `{first}` and `{second}` placeholders.
pub const STRENGTHS_TEMPLATE: Pair = (
    "Particular strengths in {first} and {second} development.",
    "{first} और {second} विकास में विशेष क्षमता।",
);

/// Contains a `{domain}` placeholder.
pub const GROWTH_TEMPLATE: Pair = (
    "Would benefit from extra support in {domain} development.",
    "{domain} विकास में अतिरिक्त सहयोग से लाभ होगा।",
);

pub const CURRENT_TERM: Pair = ("Term 1", "प्रथम सत्र");
