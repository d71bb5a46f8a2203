//! Default vocabulary seed catalog.
//!
//! Used to populate a fresh collection when no persisted state exists. Each
//! entry gets a fresh id and zero-valued progression fields at seed time,
//! and the catalog is shuffled into unbiased random order so a new user is
//! not served words in alphabet clusters.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{Word, WordMeaning};

/// Raw entry: term, phonetic, example, (pos, definition) pairs.
type RawEntry = (&'static str, &'static str, &'static str, &'static [(&'static str, &'static str)]);

static CET4_CATALOG: &[RawEntry] = &[
    ("capacity", "/kəˈpæsəti/", "The stadium has a seating capacity of 50,000.", &[("n.", "容量；能力；生产力")]),
    ("brief", "/briːf/", "He gave a brief account of the events.", &[("adj.", "简短的；短暂的"), ("n.", "摘要")]),
    ("efficient", "/ɪˈfɪʃnt/", "We need a more efficient way of handling waste.", &[("adj.", "效率高的；有能力的")]),
    ("maintain", "/meɪnˈteɪn/", "It's important to maintain a steady speed.", &[("v.", "维持；保养；坚持认为")]),
    ("flexible", "/ˈfleksəbl/", "Our plans need to be flexible.", &[("adj.", "易弯曲的；灵活的")]),
    ("genuine", "/ˈdʒenjuɪn/", "Is the painting a genuine Picasso?", &[("adj.", "真诚的；真实的")]),
    ("horizon", "/həˈraɪzn/", "The sun sank below the horizon.", &[("n.", "地平线；眼界；见识")]),
    ("justify", "/ˈdʒʌstɪfaɪ/", "How can you justify such a high salary?", &[("v.", "证明...是正当的；辩解")]),
    ("leisure", "/ˈleʒə(r)/", "I have very little leisure time.", &[("n.", "闲暇；空闲")]),
    ("neglect", "/nɪˈɡlekt/", "Don't neglect your health.", &[("v.", "疏忽；忽视"), ("n.", "疏忽")]),
    ("objective", "/əbˈdʒektɪv/", "He tried to be as objective as possible.", &[("n.", "目标"), ("adj.", "客观的")]),
    ("radical", "/ˈrædɪkl/", "The company needs a radical change.", &[("adj.", "根本的；彻底的；激进的")]),
    ("sensitive", "/ˈsensətɪv/", "He's very sensitive about his weight.", &[("adj.", "敏感的；易受伤害的")]),
    ("ultimate", "/ˈʌltɪmət/", "Our ultimate goal is world peace.", &[("adj.", "最终的；极限的")]),
    ("vague", "/veɪɡ/", "I have a vague memory of that place.", &[("adj.", "模糊的；不明确的")]),
    ("witness", "/ˈwɪtnəs/", "Did anyone witness the accident?", &[("n.", "证人；目击者"), ("v.", "目击")]),
    ("ambition", "/æmˈbɪʃn/", "His ambition is to be a doctor.", &[("n.", "雄心；野心")]),
    ("candidate", "/ˈkændɪdət/", "She is a strong candidate for the job.", &[("n.", "候选人；报考者")]),
    ("dilemma", "/dɪˈlemə/", "I am in a difficult dilemma.", &[("n.", "窘境；进退两难")]),
    ("elaborate", "/ɪˈlæbərət/", "The dancers wore elaborate costumes.", &[("adj.", "复杂的"), ("v.", "详细阐述")]),
    ("guarantee", "/ˌɡærənˈtiː/", "We offer a money-back guarantee.", &[("n.", "保证；担保"), ("v.", "保证")]),
    ("hardship", "/ˈhɑːrdʃɪp/", "The family suffered great hardship.", &[("n.", "艰难；困苦")]),
    ("magnify", "/ˈmæɡnɪfaɪ/", "A microscope magnifies small objects.", &[("v.", "放大；夸大")]),
    ("observe", "/əbˈzɜːrv/", "The police observed the man's house.", &[("v.", "观察；遵守")]),
    ("package", "/ˈpækɪdʒ/", "A package arrived in the mail.", &[("n.", "包裹"), ("v.", "打包")]),
    ("quantity", "/ˈkwɒntəti/", "They buy in large quantities.", &[("n.", "量；数量")]),
    ("random", "/ˈrændəm/", "It was a random choice.", &[("adj.", "随机的")]),
    ("yield", "/jiːld/", "The trees yield a lot of fruit.", &[("v.", "屈服；产出"), ("n.", "产量")]),
    ("zealous", "/ˈzeləs/", "He is a zealous supporter of the cause.", &[("adj.", "热心的；狂热的")]),
    ("concept", "/ˈkɒnsept/", "The concept of time is difficult.", &[("n.", "概念；观念")]),
    ("decade", "/ˈdekeɪd/", "Technology changed much in the last decade.", &[("n.", "十年")]),
    ("frequently", "/ˈfriːkwəntli/", "I frequently visit my grandparents.", &[("adv.", "频繁地")]),
    ("impact", "/ˈɪmpækt/", "The crash had a major impact.", &[("n.", "巨大影响；撞击")]),
    ("knowledge", "/ˈnɒlɪdʒ/", "He has a broad knowledge of history.", &[("n.", "知识；了解")]),
    ("participate", "/pɑːˈtɪsɪpeɪt/", "Everyone should participate in the event.", &[("v.", "参与；参加")]),
    ("qualify", "/ˈkwɒlɪfaɪ/", "He qualified for the competition.", &[("v.", "取得资格；使合格")]),
    ("suspect", "/səˈspekt/", "The police suspect he stole the money.", &[("v.", "怀疑"), ("n.", "嫌疑人")]),
    ("temporary", "/ˈtemprəri/", "This is a temporary solution.", &[("adj.", "暂时的")]),
    ("visual", "/ˈvɪʒuəl/", "The movie has great visual effects.", &[("adj.", "视觉的")]),
];

/// Build the default catalog in unbiased random order.
pub fn default_catalog<R: Rng>(rng: &mut R) -> Vec<Word> {
    let mut words: Vec<Word> = CET4_CATALOG
        .iter()
        .map(|(term, phonetic, example, meanings)| {
            let meanings = meanings
                .iter()
                .map(|(pos, definition)| WordMeaning {
                    pos: (*pos).to_string(),
                    definition: (*definition).to_string(),
                })
                .collect();
            let mut word = Word::new(*term, meanings);
            word.phonetic = (*phonetic).to_string();
            word.example = (*example).to_string();
            word
        })
        .collect();
    words.shuffle(rng);
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn catalog_entries_are_fresh() {
        let mut rng = StdRng::seed_from_u64(7);
        let words = default_catalog(&mut rng);
        assert_eq!(words.len(), CET4_CATALOG.len());
        for w in &words {
            assert_eq!(w.level, 0);
            assert!(!w.is_learned);
            assert_eq!(w.last_reviewed_ms, 0);
            assert_eq!(w.next_due_ms, 0);
            assert!(!w.meanings.is_empty());
        }
    }

    #[test]
    fn catalog_ids_are_unique() {
        let mut rng = StdRng::seed_from_u64(7);
        let words = default_catalog(&mut rng);
        let ids: HashSet<_> = words.iter().map(|w| w.id).collect();
        assert_eq!(ids.len(), words.len());
    }

    #[test]
    fn catalog_order_is_shuffled() {
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        let terms_a: Vec<_> = default_catalog(&mut a).into_iter().map(|w| w.term).collect();
        let terms_b: Vec<_> = default_catalog(&mut b).into_iter().map(|w| w.term).collect();
        assert_ne!(terms_a, terms_b);

        let sorted_a: HashSet<_> = terms_a.into_iter().collect();
        let sorted_b: HashSet<_> = terms_b.into_iter().collect();
        assert_eq!(sorted_a, sorted_b);
    }
}
