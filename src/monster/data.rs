//! Monster catalog, drawn from the Classic of Mountains and Seas.

use super::types::MonsterTemplate;

/// The first entry is the opponent a brand-new player starts with.
pub const MONSTERS: &[MonsterTemplate] = &[
    // Farming
    MonsterTemplate {
        id: "dangkang",
        name: "当康",
        en_name: Some("Dangkang"),
        tier: 1,
        max_hp: 50,
        theme: "farming",
        description: "A tusked boar whose cry heralds a bountiful harvest.",
    },
    MonsterTemplate {
        id: "lili",
        name: "狸力",
        en_name: Some("Lili"),
        tier: 2,
        max_hp: 250,
        theme: "farming",
        description: "A clawed burrower that churns fields into earthworks.",
    },
    MonsterTemplate {
        id: "zhu",
        name: "鴸",
        en_name: Some("Zhu"),
        tier: 3,
        max_hp: 500,
        theme: "farming",
        description: "An owl-like bird with human hands that drives scholars into exile.",
    },
    // Mining
    MonsterTemplate {
        id: "menghuai",
        name: "孟槐",
        en_name: Some("Menghuai"),
        tier: 1,
        max_hp: 50,
        theme: "mining",
        description: "A red-maned porcupine kept to ward off evil in the tunnels.",
    },
    MonsterTemplate {
        id: "tulou",
        name: "土蝼",
        en_name: Some("Tulou"),
        tier: 2,
        max_hp: 250,
        theme: "mining",
        description: "A four-horned ram that devours miners who stray too deep.",
    },
    MonsterTemplate {
        id: "xiqu",
        name: "犀渠",
        en_name: Some("Xiqu"),
        tier: 3,
        max_hp: 500,
        theme: "mining",
        description: "A bronze-hided ox that cries like an infant.",
    },
    // Deep sea
    MonsterTemplate {
        id: "wenyao",
        name: "文鳐鱼",
        en_name: Some("Wenyao Fish"),
        tier: 1,
        max_hp: 50,
        theme: "sea",
        description: "A winged fish that glides across the waves at night.",
    },
    MonsterTemplate {
        id: "chiru",
        name: "赤鱬",
        en_name: Some("Chiru"),
        tier: 2,
        max_hp: 250,
        theme: "sea",
        description: "A fish with a human face and a voice like a mandarin duck.",
    },
    MonsterTemplate {
        id: "kun",
        name: "鲲",
        en_name: Some("Kun"),
        tier: 5,
        max_hp: 2_000,
        theme: "sea",
        description: "A fish so vast no one knows how many thousand li it spans.",
    },
    // Cosmos
    MonsterTemplate {
        id: "bifang",
        name: "毕方",
        en_name: Some("Bifang"),
        tier: 3,
        max_hp: 500,
        theme: "cosmos",
        description: "A one-legged crane that trails wildfire wherever it lands.",
    },
    MonsterTemplate {
        id: "dijiang",
        name: "帝江",
        en_name: Some("Dijiang"),
        tier: 4,
        max_hp: 1_000,
        theme: "cosmos",
        description: "A faceless, six-legged spirit of song and dance.",
    },
    MonsterTemplate {
        id: "zhulong",
        name: "烛龙",
        en_name: Some("Zhulong"),
        tier: 4,
        max_hp: 1_000,
        theme: "cosmos",
        description: "The torch dragon; day when its eyes open, night when they close.",
    },
];

pub fn default_template() -> &'static MonsterTemplate {
    &MONSTERS[0]
}

pub fn find_template(id: &str) -> Option<&'static MonsterTemplate> {
    MONSTERS.iter().find(|m| m.id == id)
}

/// Templates grouped by theme, themes in catalog order.
pub fn templates_by_theme() -> Vec<(&'static str, Vec<&'static MonsterTemplate>)> {
    let mut groups: Vec<(&'static str, Vec<&'static MonsterTemplate>)> = Vec::new();
    for template in MONSTERS {
        match groups.iter_mut().find(|(theme, _)| *theme == template.theme) {
            Some((_, members)) => members.push(template),
            None => groups.push((template.theme, vec![template])),
        }
    }
    groups
}
