//! Built-in Korean labels used when no dictionary answers.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::source::LabelSource;

static FALLBACKS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("app.title", "설날 인사말 생성기"),
        ("intro.subtitle", "받는 사람과 말투를 고르면 인사말을 추천해 드려요"),
        ("intro.start", "시작하기"),
        ("recipient.title", "누구에게 보내나요?"),
        ("recipient.parents", "부모님"),
        ("recipient.grandparents", "조부모님"),
        ("recipient.boss", "직장 상사"),
        ("recipient.colleague", "직장 동료"),
        ("recipient.friend", "친구"),
        ("recipient.partner", "연인"),
        ("recipient.sns", "SNS용"),
        ("tone.title", "어떤 말투로 할까요?"),
        ("tone.formal", "격식체"),
        ("tone.casual", "반말"),
        ("tone.funny", "재미있는"),
        ("result.title", "추천 인사말"),
        ("result.empty", "표시할 인사말이 없어요"),
        ("button.copy", "복사"),
        ("button.share", "공유"),
        ("button.regenerate", "다시 생성"),
        ("button.new", "처음으로"),
        ("button.back", "뒤로"),
        ("greeting.copied", "복사됨"),
        ("greeting.copiedToast", "인사말이 복사되었습니다!"),
        ("greeting.copyFailed", "복사 실패"),
        ("greeting.shared", "인사말을 공유했어요"),
        ("share.title", "설날 인사말"),
        ("history.title", "최근 복사한 인사말"),
        ("history.clear", "기록 지우기"),
        ("lang.title", "언어 선택"),
        ("footer.intro", "Enter 시작 · t 테마 · l 언어 · q 종료"),
        ("footer.select", "↑/↓ 이동 · Enter 선택 · Esc 뒤로 · q 종료"),
        (
            "footer.result",
            "1-4 선택 · c 복사 · s 공유 · r 다시 생성 · n 처음으로 · x 기록 지우기 · Esc 뒤로",
        ),
    ])
});

#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackTable;

impl LabelSource for FallbackTable {
    fn lookup(&self, key: &str) -> Option<String> {
        FALLBACKS.get(key).map(|s| s.to_string())
    }
}
