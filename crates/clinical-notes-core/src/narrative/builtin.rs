//! Built-in questionnaire vocabularies.
//!
//! - IIEF-5: erectile function, 5 items coded 1-5 (0 = no sexual activity)
//! - PEDT: premature ejaculation diagnostic tool, 5 items coded 0-4
//! - PE clinical: clinician's premature ejaculation assessment

use crate::models::{
    AlternateTemplate, AnswerOption, BandColor, QuestionDefinition, QuestionnaireDefinition,
    QuestionnaireKind, SeverityThreshold,
};

impl QuestionnaireKind {
    /// The built-in definition for this questionnaire.
    pub fn definition(self) -> QuestionnaireDefinition {
        match self {
            Self::Iief5 => iief5(),
            Self::Pedt => pedt(),
            Self::PeClinical => pe_clinical(),
        }
    }
}

fn question(
    key: &str,
    options: &[(&str, &str)],
    template: &str,
    alternate: Option<(&[&str], &str)>,
) -> QuestionDefinition {
    QuestionDefinition {
        key: key.into(),
        options: options
            .iter()
            .map(|(code, label)| AnswerOption::new(*code, *label))
            .collect(),
        template: template.into(),
        alternate: alternate.map(|(codes, template)| AlternateTemplate {
            codes: codes.iter().map(|c| c.to_string()).collect(),
            template: template.into(),
        }),
    }
}

const IIEF_FREQUENCY: [(&str, &str); 6] = [
    ("0", "cinsel aktivite yok"),
    ("1", "hiç veya neredeyse hiç"),
    ("2", "birkaç kez"),
    ("3", "bazen"),
    ("4", "çoğu zaman"),
    ("5", "her zaman veya neredeyse her zaman"),
];

const NO_ATTEMPT: &[&str] = &["0"];

/// IIEF-5 (Sexual Health Inventory for Men).
pub fn iief5() -> QuestionnaireDefinition {
    QuestionnaireDefinition {
        id: QuestionnaireKind::Iief5.id().into(),
        name: "IIEF-5".into(),
        header: "IIEF-5 Değerlendirmesi:".into(),
        questions: vec![
            question(
                "q1",
                &[
                    ("1", "çok düşük"),
                    ("2", "düşük"),
                    ("3", "orta"),
                    ("4", "yüksek"),
                    ("5", "çok yüksek"),
                ],
                "Ereksiyon olma ve ereksiyonu sürdürme konusundaki güvenini {label} olarak değerlendirdi.",
                None,
            ),
            question(
                "q2",
                &IIEF_FREQUENCY,
                "Cinsel uyarı ile oluşan ereksiyonun penetrasyon için yeterli sertlikte olma sıklığını {label} olarak bildirdi.",
                Some((NO_ATTEMPT, "Son 6 ayda cinsel aktivitesi olmadığını bildirdi.")),
            ),
            question(
                "q3",
                &IIEF_FREQUENCY,
                "Penetrasyon sonrası ereksiyonu sürdürebilme sıklığını {label} olarak bildirdi.",
                Some((NO_ATTEMPT, "Cinsel ilişki girişiminde bulunmadığını bildirdi.")),
            ),
            question(
                "q4",
                &[
                    ("0", "ilişki girişimi yok"),
                    ("1", "aşırı derecede zor"),
                    ("2", "çok zor"),
                    ("3", "zor"),
                    ("4", "biraz zor"),
                    ("5", "zor değil"),
                ],
                "İlişkinin sonuna kadar ereksiyonu sürdürmeyi {label} olarak tanımladı.",
                Some((NO_ATTEMPT, "İlişkinin sonuna kadar ereksiyonu sürdürme girişiminde bulunmadığını bildirdi.")),
            ),
            question(
                "q5",
                &[
                    ("0", "ilişki girişimi yok"),
                    ("1", "hiç veya neredeyse hiç"),
                    ("2", "birkaç kez"),
                    ("3", "bazen"),
                    ("4", "çoğu zaman"),
                    ("5", "her zaman veya neredeyse her zaman"),
                ],
                "Cinsel ilişkinin tatmin edici olma sıklığını {label} olarak bildirdi.",
                Some((NO_ATTEMPT, "Tatmin değerlendirmesi için cinsel ilişki girişimi olmadığını bildirdi.")),
            ),
        ],
        max_score: 25,
        summary_template: "{name} toplam skoru {total}/{max} olup {label} ile uyumludur.".into(),
        thresholds: vec![
            SeverityThreshold::new(22, "Erektil Disfonksiyon Yok", BandColor::Emerald),
            SeverityThreshold::new(17, "Hafif ED", BandColor::Lime),
            SeverityThreshold::new(12, "Hafif-Orta ED", BandColor::Yellow),
            SeverityThreshold::new(8, "Orta ED", BandColor::Orange),
            SeverityThreshold::new(0, "Şiddetli ED", BandColor::Red),
        ],
    }
}

const PEDT_FREQUENCY: [(&str, &str); 5] = [
    ("0", "hiç veya neredeyse hiç"),
    ("1", "nadiren"),
    ("2", "yaklaşık yarı yarıya"),
    ("3", "çoğu zaman"),
    ("4", "her zaman veya neredeyse her zaman"),
];

const PEDT_INTENSITY: [(&str, &str); 5] = [
    ("0", "yok"),
    ("1", "hafif"),
    ("2", "orta"),
    ("3", "belirgin"),
    ("4", "aşırı"),
];

const NONE: &[&str] = &["0"];

const NO_CONTROL: &[&str] = &["4"];

/// Premature Ejaculation Diagnostic Tool.
pub fn pedt() -> QuestionnaireDefinition {
    QuestionnaireDefinition {
        id: QuestionnaireKind::Pedt.id().into(),
        name: "PEDT".into(),
        header: "PEDT Değerlendirmesi:".into(),
        questions: vec![
            question(
                "q1",
                &[
                    ("0", "hiç zor değil"),
                    ("1", "biraz zor"),
                    ("2", "orta derecede zor"),
                    ("3", "çok zor"),
                    ("4", "aşırı derecede zor"),
                ],
                "Boşalmayı geciktirmeyi {label} olarak tanımladı.",
                Some((NONE, "Boşalmayı geciktirmekte zorluk yaşamadığını belirtti.")),
            ),
            question(
                "q2",
                &PEDT_FREQUENCY,
                "İstediğinden önce boşalma sıklığını {label} olarak bildirdi.",
                Some((NONE, "İstediğinden önce boşalmadığını belirtti.")),
            ),
            question(
                "q3",
                &PEDT_FREQUENCY,
                "Çok az uyarı ile boşalma sıklığını {label} olarak bildirdi.",
                Some((NONE, "Çok az uyarı ile boşalma yaşamadığını belirtti.")),
            ),
            question(
                "q4",
                &PEDT_INTENSITY,
                "Erken boşalma nedeniyle {label} düzeyde hayal kırıklığı yaşadığını ifade etti.",
                Some((NONE, "Erken boşalma nedeniyle hayal kırıklığı yaşamadığını ifade etti.")),
            ),
            question(
                "q5",
                &PEDT_INTENSITY,
                "Boşalma zamanının partnerini tatminsiz bırakacağına dair {label} düzeyde endişe duyduğunu belirtti.",
                Some((NONE, "Boşalma zamanının partnerini tatminsiz bırakacağına dair endişe duymadığını belirtti.")),
            ),
        ],
        max_score: 20,
        summary_template: "{name} toplam skoru {total}/{max}: {label}.".into(),
        thresholds: vec![
            SeverityThreshold::new(11, "PE Mevcut", BandColor::Red),
            SeverityThreshold::new(9, "PE Olası", BandColor::Orange),
            SeverityThreshold::new(5, "PE Olası Değil", BandColor::Lime),
            SeverityThreshold::new(0, "Normal", BandColor::Emerald),
        ],
    }
}

/// Clinician's premature ejaculation assessment.
///
/// The PE type is categorical and scores 0; the other four items are 0-4.
pub fn pe_clinical() -> QuestionnaireDefinition {
    QuestionnaireDefinition {
        id: QuestionnaireKind::PeClinical.id().into(),
        name: "PE Klinik".into(),
        header: "Erken Boşalma Klinik Değerlendirmesi:".into(),
        questions: vec![
            question(
                "pe_type",
                &[
                    ("lifelong", "yaşam boyu (primer)"),
                    ("acquired", "sonradan gelişen (sekonder)"),
                    ("variable", "değişken"),
                    ("subjective", "subjektif"),
                ],
                "Erken boşalma tipi {label} olarak değerlendirildi.",
                None,
            ),
            question(
                "ielt",
                &[
                    ("0", "5 dakikadan uzun"),
                    ("1", "3-5 dakika"),
                    ("2", "1-3 dakika"),
                    ("3", "1 dakikadan kısa"),
                    ("4", "penetrasyon öncesi veya hemen sonrası"),
                ],
                "Tahmini intravajinal ejakülasyon latans süresi (IELT): {label}.",
                None,
            ),
            question(
                "control",
                &[
                    ("0", "tam"),
                    ("1", "iyi"),
                    ("2", "orta"),
                    ("3", "zayıf"),
                    ("4", "yok"),
                ],
                "Boşalma üzerindeki kontrolünü {label} olarak tanımladı.",
                Some((NO_CONTROL, "Boşalma üzerinde kontrolü olmadığını belirtti.")),
            ),
            question(
                "distress",
                &PEDT_INTENSITY,
                "Duruma bağlı {label} düzeyde kişisel sıkıntı bildirdi.",
                Some((NONE, "Duruma bağlı kişisel sıkıntı bildirmedi.")),
            ),
            question(
                "interpersonal",
                &PEDT_INTENSITY,
                "Partner ilişkisinde {label} düzeyde sorun yaşandığını belirtti.",
                Some((NONE, "Durumun partner ilişkisinde soruna yol açmadığını belirtti.")),
            ),
        ],
        max_score: 16,
        summary_template: "Klinik PE şiddet skoru {total}/{max} ({label}).".into(),
        thresholds: vec![
            SeverityThreshold::new(12, "Şiddetli", BandColor::Red),
            SeverityThreshold::new(8, "Orta", BandColor::Orange),
            SeverityThreshold::new(4, "Hafif", BandColor::Lime),
            SeverityThreshold::new(0, "Minimal", BandColor::Emerald),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::Questionnaire;

    #[test]
    fn test_builtin_definitions_are_valid() {
        for kind in QuestionnaireKind::ALL {
            let definition = kind.definition();
            assert_eq!(definition.id, kind.id());
            assert!(Questionnaire::new(definition).is_ok(), "{:?} failed validation", kind);
        }
    }

    #[test]
    fn test_max_scores_match_option_tables() {
        for kind in QuestionnaireKind::ALL {
            let definition = kind.definition();
            let reachable: i64 = definition
                .questions
                .iter()
                .map(|q| {
                    q.options
                        .iter()
                        .filter_map(|o| o.code.parse::<i64>().ok())
                        .max()
                        .unwrap_or(0)
                })
                .sum();
            assert_eq!(reachable, definition.max_score, "{:?}", kind);
        }
    }

    #[test]
    fn test_iief5_bands() {
        let q = Questionnaire::builtin(QuestionnaireKind::Iief5);
        assert_eq!(q.classify_severity(25, true).label, "Erektil Disfonksiyon Yok");
        assert_eq!(q.classify_severity(21, true).label, "Hafif ED");
        assert_eq!(q.classify_severity(12, true).label, "Hafif-Orta ED");
        assert_eq!(q.classify_severity(11, true).label, "Orta ED");
        assert_eq!(q.classify_severity(5, true).label, "Şiddetli ED");
    }

    #[test]
    fn test_pe_clinical_categorical_type_scores_zero() {
        let q = Questionnaire::builtin(QuestionnaireKind::PeClinical);
        let answers = crate::models::AnswerSet::new()
            .with("pe_type", "lifelong")
            .with("ielt", "3")
            .with("control", "4");

        assert_eq!(q.compute_total(&answers), 7);
        assert_eq!(
            q.build_narrative(&answers).unwrap(),
            "Erken Boşalma Klinik Değerlendirmesi: \
             Erken boşalma tipi yaşam boyu (primer) olarak değerlendirildi. \
             Tahmini intravajinal ejakülasyon latans süresi (IELT): 1 dakikadan kısa. \
             Boşalma üzerinde kontrolü olmadığını belirtti. \
             Klinik PE şiddet skoru 7/16 (Hafif)."
        );
    }
}
