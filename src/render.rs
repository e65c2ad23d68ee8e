//! Plain-text presentation of the catalog browser.
//!
//! Cards, the contract dialog, the "no results" block, and the static
//! informational sections. Tier labels come from the classifiers; nothing here
//! decides which demons are shown.

use crate::browser::{CatalogPage, Section};
use crate::catalog::{CatalogMetadata, Demon};
use crate::tier::{DANGER_DOMAIN, LegendEntry, POWER_DOMAIN, danger_legend, power_legend};
use anyhow::Result;
use std::fmt::Write;

/// Format a whole-unit price with comma thousands separators: `¥120,000`.
pub fn format_price(currency: &str, price: u64) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{currency}{grouped}")
}

pub fn render_header(meta: &CatalogMetadata, active: Section) -> String {
    let nav = Section::ALL
        .iter()
        .map(|section| {
            if *section == active {
                format!("[{}]", section.title())
            } else {
                section.title().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n{nav}\n", meta.title.to_uppercase())
}

pub fn render_card(meta: &CatalogMetadata, demon: &Demon) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}  <{}>", demon.name, demon.kind)?;
    writeln!(
        out,
        "  Сила: {}/{} [{}]  Опасность: {}/{} [{}]",
        demon.power,
        POWER_DOMAIN.end(),
        demon.power_tier()?,
        demon.danger,
        DANGER_DOMAIN.end(),
        demon.danger_tier()?
    )?;
    writeln!(out, "  + {}", demon.ability)?;
    writeln!(out, "  - {}", demon.weakness)?;
    writeln!(
        out,
        "  {}  (#{})",
        format_price(&meta.currency, demon.price),
        demon.id
    )?;
    Ok(out)
}

/// The contract dialog opened from a card.
pub fn render_detail(meta: &CatalogMetadata, demon: &Demon) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", demon.name)?;
    writeln!(out, "Детали контракта с демоном")?;
    writeln!(out)?;
    if let Some(description) = &demon.description {
        writeln!(out, "{description}")?;
        writeln!(out)?;
    }
    writeln!(out, "Тип:        {}", demon.kind)?;
    writeln!(
        out,
        "Стоимость:  {}",
        format_price(&meta.currency, demon.price)
    )?;
    writeln!(
        out,
        "Сила:       {}/{} [{}]",
        demon.power,
        POWER_DOMAIN.end(),
        demon.power_tier()?
    )?;
    writeln!(
        out,
        "Опасность:  {}/{} [{}]",
        demon.danger,
        DANGER_DOMAIN.end(),
        demon.danger_tier()?
    )?;
    writeln!(out)?;
    writeln!(out, "Способность:\n  {}", demon.ability)?;
    writeln!(out, "Слабость:\n  {}", demon.weakness)?;
    Ok(out)
}

pub fn render_page(meta: &CatalogMetadata, page: &CatalogPage<'_>) -> Result<String> {
    match page {
        CatalogPage::NoResults => Ok("Демоны не найдены\nПопробуйте изменить фильтры\n".to_string()),
        CatalogPage::Matches(demons) => {
            let cards = demons
                .iter()
                .map(|demon| render_card(meta, demon))
                .collect::<Result<Vec<_>>>()?;
            Ok(cards.join("\n"))
        }
    }
}

/// One compact JSON object per demon, newline-terminated.
pub fn render_ndjson(demons: &[&Demon]) -> Result<String> {
    let mut out = String::new();
    for demon in demons {
        out.push_str(&serde_json::to_string(demon)?);
        out.push('\n');
    }
    Ok(out)
}

/// Static text for the non-catalog sections. `Catalog` renders nothing here.
pub fn render_section(section: Section) -> Result<String> {
    let mut out = String::new();
    match section {
        Section::Catalog => {}
        Section::About => {
            writeln!(out, "О демонах\n")?;
            writeln!(out, "Что такое демоны?")?;
            writeln!(
                out,
                "  Демоны в нашем мире — это сверхъестественные существа, рождённые из человеческих страхов.\n  Чем сильнее страх перед объектом или концепцией, тем могущественнее демон."
            )?;
            writeln!(
                out,
                "  Слабые демоны, представленные в нашем каталоге, происходят из незначительных или специфических страхов.\n  Они идеально подходят для начинающих охотников на демонов.\n"
            )?;
            writeln!(out, "Классификация по силе")?;
            write_legend(&mut out, &power_legend()?)?;
            writeln!(out, "\nУровни опасности")?;
            write_legend(&mut out, &danger_legend()?)?;
        }
        Section::Contracts => {
            writeln!(out, "Контракты и договоры\n")?;
            writeln!(out, "Как работают контракты")?;
            writeln!(
                out,
                "  Контракт с демоном — это взаимное соглашение между охотником и демоном.\n  Вы получаете часть силы демона в обмен на определённую плату.\n"
            )?;
            writeln!(out, "Стандартные условия:")?;
            for term in [
                "Оплата производится в йенах (¥)",
                "Контракт действует до выполнения задачи",
                "Демон должен подчиняться вашим командам",
                "В случае гибели демона — возврат средств не производится",
            ] {
                writeln!(out, "  * {term}")?;
            }
            writeln!(out, "\nВажные предупреждения")?;
            for warning in [
                "Не пытайтесь обмануть демона — контракт магически обязывающий",
                "Использование силы демона требует ментальной стойкости",
                "Слабость демона может стать вашей слабостью",
            ] {
                writeln!(out, "  ! {warning}")?;
            }
            writeln!(out, "\nПроцесс оформления")?;
            let steps = [
                ("Выбор демона", "Изучите каталог и выберите подходящего демона"),
                ("Оплата", "Переведите указанную сумму в йенах"),
                ("Ритуал призыва", "Проведите церемонию призыва демона"),
                ("Активация контракта", "Подпишите магический контракт кровью"),
            ];
            for (idx, (step, detail)) in steps.iter().enumerate() {
                writeln!(out, "  {}. {step}: {detail}", idx + 1)?;
            }
        }
        Section::Contact => {
            writeln!(out, "Контакты для связи\n")?;
            writeln!(out, "Мы работаем круглосуточно для вашего удобства")?;
            for (label, value) in [
                ("Телефон", "+81 3-1234-5678"),
                ("Email", "contracts@black-deal.jp"),
                ("Офис", "Токио, Сибуя, ул. Охотников, 13"),
                ("Часы работы", "24/7 - Демоны не спят"),
            ] {
                writeln!(out, "  {label}: {value}")?;
            }
            writeln!(
                out,
                "\nЭкстренная помощь: если контракт вышел из-под контроля, немедленно звоните на горячую линию: +81 3-9999-6666"
            )?;
        }
    }
    Ok(out)
}

fn write_legend(out: &mut String, entries: &[LegendEntry]) -> Result<()> {
    for entry in entries {
        writeln!(out, "  {:<4} [{}] {}", entry.label, entry.tier, entry.meaning)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::BrowserState;
    use crate::catalog::{CatalogIndex, DemonId};

    #[test]
    fn price_grouping_matches_locale_format() {
        assert_eq!(format_price("¥", 0), "¥0");
        assert_eq!(format_price("¥", 999), "¥999");
        assert_eq!(format_price("¥", 50000), "¥50,000");
        assert_eq!(format_price("¥", 120000), "¥120,000");
        assert_eq!(format_price("¥", 1234567), "¥1,234,567");
    }

    #[test]
    fn card_shows_ratings_with_tiers() -> Result<()> {
        let index = CatalogIndex::builtin()?;
        let scissors = index.demon(DemonId(7)).expect("demon 7");
        let card = render_card(index.metadata(), scissors)?;
        assert!(card.contains("Демон-Ножниц  <Предметный>"), "{card}");
        assert!(card.contains("Сила: 5/5 [high]"), "{card}");
        assert!(card.contains("Опасность: 4/4 [high]"), "{card}");
        assert!(card.contains("¥180,000"), "{card}");
        Ok(())
    }

    #[test]
    fn detail_includes_optional_description() -> Result<()> {
        let index = CatalogIndex::builtin()?;
        let mut cat = index.demon(DemonId(3)).expect("demon 3").clone();
        let detail = render_detail(index.metadata(), &cat)?;
        assert!(detail.contains("Детали контракта с демоном"));
        assert!(detail.contains("Изящный хищник"));

        cat.description = None;
        let abridged = render_detail(index.metadata(), &cat)?;
        assert!(!abridged.contains("Изящный хищник"));
        assert!(abridged.contains("Сила:       4/5 [medium]"), "{abridged}");
        Ok(())
    }

    #[test]
    fn empty_page_renders_no_results_block() -> Result<()> {
        let index = CatalogIndex::builtin()?;
        let page = BrowserState::default()
            .with_search("zzz")
            .page(index.demons());
        let text = render_page(index.metadata(), &page)?;
        assert!(text.starts_with("Демоны не найдены"));
        Ok(())
    }

    #[test]
    fn ndjson_emits_one_line_per_demon() -> Result<()> {
        let index = CatalogIndex::builtin()?;
        let demons: Vec<&Demon> = index.demons().iter().take(2).collect();
        let text = render_ndjson(&demons)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0])?;
        assert_eq!(first["name"], "Демон-Сыра");
        assert_eq!(first["type"], "Пищевой");
        Ok(())
    }

    #[test]
    fn about_section_lists_legends() -> Result<()> {
        let text = render_section(Section::About)?;
        assert!(text.contains("1-2  [low]"), "{text}");
        assert!(text.contains("4    [high] Смертельный"), "{text}");
        assert!(render_section(Section::Catalog)?.is_empty());
        Ok(())
    }

    #[test]
    fn header_marks_active_section() {
        let meta = CatalogIndex::builtin().unwrap().metadata().clone();
        let header = render_header(&meta, Section::Contracts);
        assert!(header.starts_with("ЧЁРНАЯ СДЕЛКА"));
        assert!(header.contains("[Контракты]"));
        assert!(!header.contains("[Каталог]"));
    }
}
