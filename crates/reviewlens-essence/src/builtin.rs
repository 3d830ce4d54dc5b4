//! Built-in essence table, one entry per supported business category.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::types::EssenceConfig;

/// Category ids shipped with the binary.
pub const BUILTIN_CATEGORIES: &[&str] = &[
    "restaurant",
    "cafe",
    "beauty",
    "healthcare",
    "education",
    "fitness",
    "lodging",
    "funeral",
    "auto_repair",
    "pet_care",
];

pub(crate) static BUILTIN: Lazy<HashMap<&'static str, EssenceConfig>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(
        "restaurant",
        EssenceConfig::new("taste")
            .with_other_aspects(&["service", "atmosphere", "price", "cleanliness", "parking"])
            .with_essence_keywords(&[
                "taste", "tasty", "delicious", "flavor", "flavour", "seasoning", "fresh",
                "bland", "salty", "spicy", "broth", "texture", "portion", "menu", "dish",
                "savory", "juicy",
            ])
            .with_other_keywords(&[
                "service", "staff", "waiter", "waitress", "interior", "atmosphere", "price",
                "expensive", "cheap", "parking", "clean", "dirty", "wait", "reservation",
                "music",
            ])
            .with_weightings(&[("taste", 0.5), ("service", 0.2), ("atmosphere", 0.15), ("price", 0.15)]),
    );
    m.insert(
        "cafe",
        EssenceConfig::new("beverage quality")
            .with_other_aspects(&["atmosphere", "seating", "price", "service"])
            .with_essence_keywords(&[
                "coffee", "espresso", "latte", "brew", "roast", "bean", "aroma", "bitter",
                "acidity", "tea", "dessert", "cake", "pastry", "drink",
            ])
            .with_other_keywords(&[
                "interior", "seat", "wifi", "outlet", "view", "music", "noisy", "quiet",
                "price", "staff", "parking",
            ]),
    );
    m.insert(
        "beauty",
        EssenceConfig::new("skill and result")
            .with_other_aspects(&["hygiene", "consultation", "price", "booking"])
            .with_essence_keywords(&[
                "cut", "haircut", "color", "perm", "styling", "result", "skill", "nail",
                "lash", "technique", "finish", "lasted", "shape", "skin",
            ])
            .with_other_keywords(&[
                "clean", "hygiene", "towel", "reservation", "booking", "price", "expensive",
                "friendly", "consultation", "parking", "waiting",
            ]),
    );
    m.insert(
        "healthcare",
        EssenceConfig::new("treatment quality")
            .with_other_aspects(&["waiting time", "facilities", "billing", "staff friendliness"])
            .with_essence_keywords(&[
                "diagnosis", "treatment", "doctor", "explained", "recovered", "cured",
                "symptom", "prescription", "surgery", "pain", "thorough", "accurate",
                "effective",
            ])
            .with_other_keywords(&[
                "wait", "waiting", "reception", "parking", "facility", "lobby", "bill",
                "insurance", "price", "nurse", "appointment",
            ]),
    );
    m.insert(
        "education",
        EssenceConfig::new("teaching quality")
            .with_other_aspects(&["facilities", "tuition", "location", "administration"])
            .with_essence_keywords(&[
                "teacher", "teaching", "lecture", "explain", "curriculum", "grade",
                "improved", "understand", "feedback", "instructor", "class", "lesson",
            ])
            .with_other_keywords(&[
                "building", "classroom", "tuition", "fee", "shuttle", "location", "office",
                "parking", "cafeteria", "schedule",
            ]),
    );
    m.insert(
        "fitness",
        EssenceConfig::new("coaching")
            .with_other_aspects(&["equipment", "cleanliness", "membership price", "crowding"])
            .with_essence_keywords(&[
                "trainer", "coach", "coaching", "program", "form", "posture", "routine",
                "progress", "pt", "guidance", "motivat",
            ])
            .with_other_keywords(&[
                "equipment", "machine", "locker", "shower", "clean", "membership", "price",
                "crowded", "parking", "hours",
            ]),
    );
    m.insert(
        "lodging",
        EssenceConfig::new("rest and room comfort")
            .with_other_aspects(&["location", "breakfast", "front desk", "price"])
            .with_essence_keywords(&[
                "bed", "sleep", "quiet", "room", "comfortable", "mattress", "pillow",
                "noise", "bathroom", "rested", "cozy",
            ])
            .with_other_keywords(&[
                "location", "breakfast", "front desk", "check-in", "checkin", "price",
                "parking", "pool", "view", "station",
            ]),
    );
    m.insert(
        "funeral",
        EssenceConfig::new("compassion")
            .with_other_aspects(&["facilities", "cost", "logistics", "food"])
            .with_essence_keywords(&[
                "compassion", "comfort", "respect", "dignity", "caring", "kind", "grief",
                "condolence", "sincere", "considerate", "warm", "gentle",
            ])
            .with_other_keywords(&[
                "hall", "facility", "parking", "cost", "price", "package", "food", "meal",
                "schedule", "transport",
            ]),
    );
    m.insert(
        "auto_repair",
        EssenceConfig::new("repair reliability")
            .with_other_aspects(&["price", "turnaround", "waiting area", "communication"])
            .with_essence_keywords(&[
                "fixed", "repair", "diagnos", "engine", "brake", "problem", "solved",
                "mechanic", "reliable", "honest", "again",
            ])
            .with_other_keywords(&[
                "price", "quote", "expensive", "waiting room", "coffee", "days", "pickup",
                "location", "parking",
            ]),
    );
    m.insert(
        "pet_care",
        EssenceConfig::new("animal care")
            .with_other_aspects(&["price", "facilities", "booking", "location"])
            .with_essence_keywords(&[
                "gentle", "care", "cared", "dog", "cat", "pet", "groom", "vet", "calm",
                "stress", "handled", "safe", "treat",
            ])
            .with_other_keywords(&[
                "price", "booking", "reservation", "location", "parking", "facility",
                "clean", "pickup", "hours",
            ]),
    );
    m
});
