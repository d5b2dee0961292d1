//! Names, occupations and qualifications.

use super::NameGroup::{Bengali, North, Punjabi, South, West};
use super::{Pair, SeedName};

const fn n(en: &'static str, hi: &'static str, group: super::NameGroup) -> SeedName {
    SeedName { en, hi, group }
}

pub const MALE_FIRST_NAMES: &[SeedName] = &[
    n("Aarav", "आरव", North),
    n("Vivaan", "विवान", North),
    n("Rohan", "रोहन", North),
    n("Kabir", "कबीर", North),
    n("Gurpreet", "गुरप्रीत", Punjabi),
    n("Harjeet", "हरजीत", Punjabi),
    n("Arnab", "अर्णब", Bengali),
    n("Sourav", "सौरव", Bengali),
    n("Karthik", "कार्तिक", South),
    n("Arjun", "अर्जुन", South),
    n("Venkat", "वेंकट", South),
    n("Aditya", "आदित्य", West),
    n("Omkar", "ओंकार", West),
    n("Parth", "पार्थ", West),
];

pub const FEMALE_FIRST_NAMES: &[SeedName] = &[
    n("Ananya", "अनन्या", North),
    n("Diya", "दिया", North),
    n("Saanvi", "सान्वी", North),
    n("Kavya", "काव्या", North),
    n("Simran", "सिमरन", Punjabi),
    n("Harleen", "हरलीन", Punjabi),
    n("Ishita", "इशिता", Bengali),
    n("Moumita", "मौमिता", Bengali),
    n("Lakshmi", "लक्ष्मी", South),
    n("Meera", "मीरा", South),
    n("Divya", "दिव्या", South),
    n("Pooja", "पूजा", West),
    n("Riya", "रिया", West),
    n("Tanvi", "तन्वी", West),
];

pub const LAST_NAMES: &[SeedName] = &[
    n("Sharma", "शर्मा", North),
    n("Verma", "वर्मा", North),
    n("Gupta", "गुप्ता", North),
    n("Singh", "सिंह", Punjabi),
    n("Gill", "गिल", Punjabi),
    n("Banerjee", "बनर्जी", Bengali),
    n("Das", "दास", Bengali),
    n("Iyer", "अय्यर", South),
    n("Reddy", "रेड्डी", South),
    n("Nair", "नायर", South),
    n("Patel", "पटेल", West),
    n("Deshpande", "देशपांडे", West),
];

pub const OCCUPATIONS: &[Pair] = &[
    ("Doctor", "डॉक्टर"),
    ("Engineer", "इंजीनियर"),
    ("Teacher", "शिक्षक"),
    ("Business Owner", "व्यवसायी"),
    ("Accountant", "लेखाकार"),
    ("Lawyer", "वकील"),
    ("Nurse", "नर्स"),
    ("Software Developer", "सॉफ्टवेयर डेवलपर"),
    ("Farmer", "किसान"),
    ("Bank Manager", "बैंक प्रबंधक"),
    ("Homemaker", "गृहिणी"),
    ("Architect", "वास्तुकार"),
];

pub const QUALIFICATIONS: &[Pair] = &[
    ("B.Ed.", "बी.एड."),
    ("M.Ed.", "एम.एड."),
    ("M.Sc., B.Ed.", "एम.एससी., बी.एड."),
    ("M.A., B.Ed.", "एम.ए., बी.एड."),
    ("B.Sc., B.Ed.", "बी.एससी., बी.एड."),
    ("Ph.D.", "पीएच.डी."),
];
