//! Golden tests for questionnaire narratives.

use clinical_notes_core::models::{AnswerSet, BandColor, QuestionnaireKind, NOT_EVALUATED_LABEL};
use clinical_notes_core::narrative::Questionnaire;

fn pedt_answers(values: [&str; 5]) -> AnswerSet {
    ["q1", "q2", "q3", "q4", "q5"]
        .into_iter()
        .zip(values)
        .collect()
}

#[test]
fn test_pedt_empty_is_not_evaluated() {
    let pedt = Questionnaire::builtin(QuestionnaireKind::Pedt);
    let answers = pedt_answers(["", "", "", "", ""]);

    assert!(!pedt.is_filled(&answers));
    assert_eq!(pedt.compute_total(&answers), 0);

    let band = pedt.classify_severity(pedt.compute_total(&answers), pedt.is_filled(&answers));
    assert_eq!(band.label, NOT_EVALUATED_LABEL);
    assert_eq!(band.color, BandColor::Gray);
    assert!(!band.evaluated);
}

#[test]
fn test_pedt_total_and_band() {
    let pedt = Questionnaire::builtin(QuestionnaireKind::Pedt);
    let answers = pedt_answers(["1", "2", "1", "2", "1"]);

    assert!(pedt.is_filled(&answers));
    assert_eq!(pedt.compute_total(&answers), 7);

    let band = pedt.classify_severity(7, true);
    assert_eq!(band.label, "PE Olası Değil");
    assert_eq!(band.color, BandColor::Lime);
}

#[test]
fn test_pedt_band_edges() {
    let pedt = Questionnaire::builtin(QuestionnaireKind::Pedt);
    let cases = [
        (0, "Normal", BandColor::Emerald),
        (4, "Normal", BandColor::Emerald),
        (5, "PE Olası Değil", BandColor::Lime),
        (8, "PE Olası Değil", BandColor::Lime),
        (9, "PE Olası", BandColor::Orange),
        (10, "PE Olası", BandColor::Orange),
        (11, "PE Mevcut", BandColor::Red),
        (20, "PE Mevcut", BandColor::Red),
    ];
    for (total, label, color) in cases {
        let band = pedt.classify_severity(total, true);
        assert_eq!(band.label, label, "total {}", total);
        assert_eq!(band.color, color, "total {}", total);
    }
}

#[test]
fn test_pedt_full_narrative() {
    let pedt = Questionnaire::builtin(QuestionnaireKind::Pedt);
    let answers = pedt_answers(["1", "2", "1", "2", "1"]);

    assert_eq!(
        pedt.build_narrative(&answers).unwrap(),
        "PEDT Değerlendirmesi: \
         Boşalmayı geciktirmeyi biraz zor olarak tanımladı. \
         İstediğinden önce boşalma sıklığını yaklaşık yarı yarıya olarak bildirdi. \
         Çok az uyarı ile boşalma sıklığını nadiren olarak bildirdi. \
         Erken boşalma nedeniyle orta düzeyde hayal kırıklığı yaşadığını ifade etti. \
         Boşalma zamanının partnerini tatminsiz bırakacağına dair hafif düzeyde endişe duyduğunu belirtti. \
         PEDT toplam skoru 7/20: PE Olası Değil."
    );
}

#[test]
fn test_partial_narrative_keeps_order_and_single_summary() {
    let pedt = Questionnaire::builtin(QuestionnaireKind::Pedt);
    // Inserted out of order; narrative follows question order
    let answers = AnswerSet::new().with("q4", "0").with("q2", "3");

    let narrative = pedt.build_narrative(&answers).unwrap();
    assert_eq!(
        narrative,
        "PEDT Değerlendirmesi: \
         İstediğinden önce boşalma sıklığını çoğu zaman olarak bildirdi. \
         Erken boşalma nedeniyle hayal kırıklığı yaşamadığını ifade etti. \
         PEDT toplam skoru 3/20: Normal."
    );
    assert_eq!(narrative.matches("toplam skoru").count(), 1);
}

#[test]
fn test_iief5_narrative_with_no_activity_answers() {
    let iief = Questionnaire::builtin(QuestionnaireKind::Iief5);
    let answers = AnswerSet::new()
        .with("q1", "2")
        .with("q2", "0")
        .with("q3", "")
        .with("q4", "0")
        .with("q5", "");

    assert_eq!(iief.compute_total(&answers), 2);
    assert_eq!(
        iief.build_narrative(&answers).unwrap(),
        "IIEF-5 Değerlendirmesi: \
         Ereksiyon olma ve ereksiyonu sürdürme konusundaki güvenini düşük olarak değerlendirdi. \
         Son 6 ayda cinsel aktivitesi olmadığını bildirdi. \
         İlişkinin sonuna kadar ereksiyonu sürdürme girişiminde bulunmadığını bildirdi. \
         IIEF-5 toplam skoru 2/25 olup Şiddetli ED ile uyumludur."
    );
}

#[test]
fn test_export_skipped_for_empty_answers() {
    for kind in QuestionnaireKind::ALL {
        let questionnaire = Questionnaire::builtin(kind);
        let mut appended = Vec::new();

        let exported = questionnaire.handle_export(&AnswerSet::new(), |n| appended.push(n.to_string()));

        assert!(!exported, "{:?}", kind);
        assert!(appended.is_empty(), "{:?}", kind);
        assert!(questionnaire.build_narrative(&AnswerSet::new()).is_none());
        assert!(questionnaire.export(&AnswerSet::new()).is_none());
    }
}

#[test]
fn test_export_record() {
    let pedt = Questionnaire::builtin(QuestionnaireKind::Pedt);
    let answers = pedt_answers(["4", "4", "4", "4", "4"]);

    let export = pedt.export(&answers).unwrap();
    assert_eq!(export.questionnaire_id, "pedt");
    assert_eq!(export.total, 20);
    assert_eq!(export.max_score, 20);
    assert_eq!(export.band.label, "PE Mevcut");
    assert!(export.narrative.ends_with("PEDT toplam skoru 20/20: PE Mevcut."));
    assert!(chrono::DateTime::parse_from_rfc3339(&export.generated_at).is_ok());

    let json = export.to_json().unwrap();
    assert!(json.contains("\"questionnaire_id\": \"pedt\""));
}
