// Title = monster name + adjective + noun, read as one phrase
pub const TITLE_ADJECTIVES: &[&str] = &[
    "无双", "不朽", "狂怒", "沉默", "疾风", "烈焰", "寒霜", "星辉", "孤高", "传奇", "夜行",
    "破晓",
];

pub const TITLE_NOUNS: &[&str] = &[
    "猎手", "征服者", "屠戮者", "驯服者", "克星", "宿敌", "守望者", "终结者", "行者", "霸主",
];
