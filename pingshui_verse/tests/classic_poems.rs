// End-to-end checks of well-known poems against the sample rhyme table.

use pingshui_verse::{
    CheckerConfig, LineLength, MeterScheme, OverlapPolicy, Phonology, PoemChecker, ToneCategory,
    TonePattern, Verdict,
};
use std::path::Path;

const SAMPLE: &str = include_str!("../../data/pingshui_sample.json");

// 李白《靜夜思》
const QUIET_NIGHT: &str = "床前明月光，\n疑是地上霜。\n舉頭望明月，\n低頭思故鄉。";

// 崔顥《黃鶴樓》, unbroken.
const YELLOW_CRANE: &str = "昔人已乘黃鶴去，此地空餘黃鶴樓。黃鶴一去不復返，白雲千載空悠悠。晴川歷歷漢陽樹，芳草萋萋鸚鵡洲。日暮鄉關何處是，煙波江上使人愁。";

// 杜甫《閣夜》
const NIGHT_IN_THE_PAVILION: &str = "歲莫陰陽催短景，天涯霜雪霽寒霄。
五更鼓角聲悲壯，三峽星河影動搖。
野哭千家聞戰伐，夷歌幾處起漁樵。
臥龍躍馬終黃土，人事音書漫寂寥。";

// Composed to fit the templates exactly.
const FIVE_CHAR_STRICT: &str = "春風吹雪月，白雪綠江天。落木秋山色，江流入海樓。清秋聞鶴語，古木落寒沙。碧水流雲去，千山雪月明。";
const SEVEN_CHAR_STRICT: &str = "落日春風吹雪月，東西白雪綠江天。千年落木秋山色，月落江流入海樓。玉笛清秋聞鶴語，黃雲古木落寒沙。蒼山碧水流雲去，白鶴千山雪月明。";

fn checker() -> PoemChecker {
    PoemChecker::from_json(SAMPLE, CheckerConfig::default()).unwrap()
}

#[test]
fn quiet_night_is_a_jueju() {
    assert_eq!(
        checker().check_rhyming(QUIET_NIGHT),
        Verdict::pass("Poem follows jueju rhyming rules.")
    );
}

#[test]
fn yellow_crane_tower_is_a_lushi() {
    assert_eq!(
        checker().check_rhyming(YELLOW_CRANE),
        Verdict::pass("Poem follows lushi rhyming rules.")
    );
}

#[test]
fn night_in_the_pavilion_meter_is_relaxed() {
    assert_eq!(
        checker().check_meter(NIGHT_IN_THE_PAVILION),
        Verdict::pass(
            "Poem follows the less restrictive ping-ze alternation pattern in 2nd, 4th, and 6th characters."
        )
    );
}

#[test]
fn strict_five_char_scheme() {
    assert_eq!(
        checker().check_meter(FIVE_CHAR_STRICT),
        Verdict::pass("Poem follows even_tone_unrhymed ping-ze pattern.")
    );
}

#[test]
fn strict_seven_char_scheme() {
    assert_eq!(
        checker().check_meter(SEVEN_CHAR_STRICT),
        Verdict::pass("Poem follows oblique_tone_unrhymed ping-ze pattern.")
    );
}

#[test]
fn first_character_of_seven_is_free() {
    // 天 is level where the template expects oblique.
    let raw = SEVEN_CHAR_STRICT.replacen("落日春風", "天日春風", 1);
    let checker = checker();
    let lines = checker.normalize(&raw);
    assert_eq!(
        checker.meter_report(&lines).unwrap().to_string(),
        format!("Poem follows {} ping-ze pattern.", MeterScheme::ObliqueToneUnrhymed)
    );

    let strict_config = CheckerConfig {
        exempt_first_char_of_seven: false,
        ..Default::default()
    };
    let strict = PoemChecker::from_json(SAMPLE, strict_config).unwrap();
    let verdict = strict.check_meter(&raw);
    assert!(verdict.passed);
    assert!(verdict.message.contains("less restrictive"), "{}", verdict.message);
}

#[test]
fn relaxed_mismatch_diagnostic() {
    let raw = "春風吹雪月，江流入海樓。落木秋山色，白雪綠江天。";
    assert_eq!(
        checker().check_meter(raw),
        Verdict::fail("Ping ze tone mismatch between line 1 and line 2 at character position 2.")
    );
}

#[test]
fn broken_quatrain_rhyme() {
    let checker = checker();
    assert_eq!(
        checker.check_rhyming(&QUIET_NIGHT.replace('鄉', "東")),
        Verdict::fail("Second and fourth lines must rhyme.")
    );
    assert_eq!(
        checker.check_rhyming(&QUIET_NIGHT.replace("舉頭望明月", "舉頭望明光")),
        Verdict::fail("Third line must end with a ze character.")
    );
}

#[test]
fn lushi_odd_line_rhyming_is_rejected() {
    assert_eq!(
        checker().check_rhyming(&YELLOW_CRANE.replace("不復返", "不復秋")),
        Verdict::fail("Line 3 must not rhyme with line 2.")
    );
}

#[test]
fn composed_poems_fail_the_rhyme_rules() {
    // Metrically perfect, but 天 and 樓 do not share a rhyme group.
    let checker = checker();
    for raw in [FIVE_CHAR_STRICT, SEVEN_CHAR_STRICT] {
        assert_eq!(checker.check_rhyming(raw), Verdict::fail("Line 4 must rhyme with line 2."));
    }
}

#[test]
fn wrong_line_counts() {
    let checker = checker();
    let five_lines = format!("{QUIET_NIGHT}\n床前明月光");
    for verdict in [checker.check_rhyming(&five_lines), checker.check_meter(&five_lines)] {
        assert!(!verdict.passed);
        assert!(verdict.message.starts_with("Poem must have either 4 lines (Jueju) or 8 lines (Lushi)"));
    }
}

#[test]
fn thirty_five_characters_become_five_char_lines() {
    let raw: String = std::iter::repeat_n('一', 35).collect();
    let lines = checker().normalize(&raw);
    assert_eq!(lines.len(), 7);
    assert!(lines.iter().all(|l| l.len() == LineLength::Five.chars()));
    assert!(!checker().check_rhyming(&raw).passed);
}

#[test]
fn line_tones_of_quiet_night() {
    let checker = checker();
    let rendered: Vec<String> = checker
        .normalize(QUIET_NIGHT)
        .iter()
        .map(|line| TonePattern::render(&checker.line_tones(line)))
        .collect();
    assert!(rendered.iter().all(|l| !l.contains('？')), "{rendered:?}");
    assert!(rendered[1].ends_with('平'));
    assert!(rendered[2].ends_with('仄'));
}

#[test]
fn combined_report() {
    let report = checker().check(YELLOW_CRANE);
    assert_eq!(report.lines.len(), 8);
    assert_eq!(report.lines[0], "昔人已乘黃鶴去");
    assert!(report.rhyme.passed);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["rhyme"]["passed"], true);
}

#[test]
fn load_from_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/pingshui_sample.json");
    let phonology = Phonology::load(&path, OverlapPolicy::LevelFirst).unwrap();
    assert_eq!(phonology.classify_char('樹'), ToneCategory::Oblique);
    let checker = PoemChecker::new(phonology, CheckerConfig::default());
    assert!(checker.check_rhyming(QUIET_NIGHT).passed);

    let missing = Phonology::load(Path::new("no/such/file.json"), OverlapPolicy::LevelFirst);
    assert!(missing.unwrap_err().to_string().contains("no/such/file.json"));
}

#[test]
fn concurrent_checks_agree() {
    let checker = checker();
    let poems = [QUIET_NIGHT, YELLOW_CRANE, NIGHT_IN_THE_PAVILION, FIVE_CHAR_STRICT];
    let expected: Vec<_> = poems.iter().map(|p| checker.check(p)).collect();
    let results: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = poems
            .iter()
            .map(|p| {
                let checker = &checker;
                s.spawn(move || checker.check(p))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(results, expected);
}
