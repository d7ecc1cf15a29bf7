//! 答题文档解析 - 业务能力层
//!
//! 只识别导出系统固定使用的几个结构标记：
//! - `div.section-lbl`：分区标签，文本为分区名
//! - `div.question-pnl`：题目面板
//! - 面板内文本为 "Chosen Option" 的单元格，其后一个单元格为所选选项（"--" 表示未作答）
//! - 面板内 `td.rightAns`：正确答案单元格，文本以 `<数字>.` 开头

use crate::error::ParseError;
use crate::models::SectionTally;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

const SECTION_LABEL_CLASS: &str = "section-lbl";
const QUESTION_PANEL_CLASS: &str = "question-pnl";
const RIGHT_ANSWER_CLASS: &str = "rightAns";
const CHOSEN_OPTION_LABEL: &str = "Chosen Option";
const NOT_ATTEMPTED: &str = "--";

static RIGHT_ANSWER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)\.").expect("right answer pattern is valid"));

/// 单道题的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Wrong,
    NotAttempted,
}

impl Outcome {
    /// 未作答优先；没有正确答案时永远不相等，判为错误
    pub fn classify(chosen: Option<u32>, correct: Option<u32>) -> Self {
        match chosen {
            None => Outcome::NotAttempted,
            Some(c) if Some(c) == correct => Outcome::Correct,
            Some(_) => Outcome::Wrong,
        }
    }
}

/// 解析答题文档，按分区首次出现的顺序返回统计
pub fn parse_response(document: &str) -> Result<Vec<SectionTally>, ParseError> {
    let html = Html::parse_document(document);

    let mut tallies: Vec<SectionTally> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();
    let mut current: Option<usize> = None;
    let mut panel_index = 0;

    for el in html.root_element().descendants().filter_map(ElementRef::wrap) {
        if el.value().name() != "div" {
            continue;
        }

        if has_only_class(&el, SECTION_LABEL_CLASS) {
            let name = element_text(&el);
            let idx = *index_by_name.entry(name.clone()).or_insert_with(|| {
                tallies.push(SectionTally::new(name));
                tallies.len() - 1
            });
            current = Some(idx);
            continue;
        }

        if has_only_class(&el, QUESTION_PANEL_CLASS) {
            panel_index += 1;
            let idx = current.ok_or(ParseError::PanelOutsideSection { panel_index })?;
            let tally = &mut tallies[idx];

            let chosen = chosen_option(&el, &tally.section_name)?;
            let correct = correct_option(&el);

            match Outcome::classify(chosen, correct) {
                Outcome::Correct => tally.correct_count += 1,
                Outcome::Wrong => tally.wrong_count += 1,
                Outcome::NotAttempted => tally.na_count += 1,
            }
        }
    }

    if tallies.is_empty() {
        return Err(ParseError::NoSections);
    }

    debug!("解析完成: {} 个分区, {} 道题", tallies.len(), panel_index);
    Ok(tallies)
}

/// 读取所选选项，`None` 表示未作答
fn chosen_option(panel: &ElementRef, section: &str) -> Result<Option<u32>, ParseError> {
    let Some(label_cell) = cells(panel)
        .filter(is_leaf_cell)
        .find(|td| element_text(td).contains(CHOSEN_OPTION_LABEL))
    else {
        return Ok(None);
    };

    let Some(value_cell) = label_cell
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "td")
    else {
        return Ok(None);
    };

    let value = element_text(&value_cell);
    if value == NOT_ATTEMPTED {
        return Ok(None);
    }

    value
        .parse::<u32>()
        .map(Some)
        .map_err(|_| ParseError::InvalidChosenOption {
            section: section.to_string(),
            value,
        })
}

/// 从正确答案单元格中提取第一个 `<数字>.` 的数字
fn correct_option(panel: &ElementRef) -> Option<u32> {
    let cell = cells(panel).find(|td| td.value().classes().any(|c| c == RIGHT_ANSWER_CLASS))?;
    let text = cell.text().collect::<String>();
    RIGHT_ANSWER_PATTERN
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn cells<'a>(panel: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    panel
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "td")
}

/// 不包含嵌套单元格的单元格；外层布局单元格的文本会包含内层所有文字
fn is_leaf_cell(td: &ElementRef) -> bool {
    !td.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|e| e.value().name() == "td")
}

fn has_only_class(el: &ElementRef, class: &str) -> bool {
    let mut classes = el.value().classes();
    classes.next() == Some(class) && classes.next().is_none()
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 生成一个题目面板，`chosen` 为 `None` 时写入 "--"
    pub(crate) fn panel(chosen: Option<u32>, correct: Option<u32>) -> String {
        let chosen = chosen
            .map(|c| c.to_string())
            .unwrap_or_else(|| "--".to_string());
        let right = match correct {
            Some(c) => format!(r#"<td class="rightAns">{}. Option text</td>"#, c),
            None => String::new(),
        };
        format!(
            r#"<div class="question-pnl"><table>
                <tr><td>Question ID :</td><td>12345</td></tr>
                <tr><td>Chosen Option :</td><td> {} </td></tr>
                <tr>{}</tr>
            </table></div>"#,
            chosen, right
        )
    }

    pub(crate) fn section(name: &str) -> String {
        format!(r#"<div class="section-lbl"> {} </div>"#, name)
    }

    pub(crate) fn document(body: &str) -> String {
        format!("<html><body>{}</body></html>", body)
    }

    #[test]
    fn test_physics_scenario() {
        let doc = document(&format!(
            "{}{}{}{}",
            section("Physics"),
            panel(Some(1), Some(1)),
            panel(Some(2), Some(1)),
            panel(None, Some(1)),
        ));

        let tallies = parse_response(&doc).unwrap();
        assert_eq!(tallies.len(), 1);
        assert_eq!(tallies[0].section_name, "Physics");
        assert_eq!(tallies[0].correct_count, 1);
        assert_eq!(tallies[0].wrong_count, 1);
        assert_eq!(tallies[0].na_count, 1);
    }

    #[test]
    fn test_sections_keep_first_seen_order_and_merge_repeats() {
        let doc = document(&format!(
            "{}{}{}{}{}{}",
            section("Physics"),
            panel(Some(1), Some(1)),
            section("Chemistry"),
            panel(Some(3), Some(2)),
            section("Physics"),
            panel(None, None),
        ));

        let tallies = parse_response(&doc).unwrap();
        let names: Vec<&str> = tallies.iter().map(|t| t.section_name.as_str()).collect();
        assert_eq!(names, vec!["Physics", "Chemistry"]);
        assert_eq!(tallies[0].correct_count, 1);
        assert_eq!(tallies[0].na_count, 1);
        assert_eq!(tallies[1].wrong_count, 1);
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let doc = document(&format!(
            "{}{}{}{}",
            section("Maths"),
            panel(Some(4), Some(4)),
            section("Biology"),
            panel(Some(1), Some(2)),
        ));

        assert_eq!(parse_response(&doc).unwrap(), parse_response(&doc).unwrap());
    }

    #[test]
    fn test_missing_right_answer_counts_as_wrong() {
        let doc = document(&format!("{}{}", section("Physics"), panel(Some(2), None)));

        let tallies = parse_response(&doc).unwrap();
        assert_eq!(tallies[0].wrong_count, 1);
        assert_eq!(tallies[0].na_count, 0);
    }

    #[test]
    fn test_not_attempted_ignores_correct_option() {
        for correct in [None, Some(1), Some(4)] {
            assert_eq!(Outcome::classify(None, correct), Outcome::NotAttempted);
        }
    }

    #[test]
    fn test_panel_before_section_is_rejected() {
        let doc = document(&format!("{}{}", panel(Some(1), Some(1)), section("Physics")));

        let err = parse_response(&doc).unwrap_err();
        assert!(matches!(err, ParseError::PanelOutsideSection { panel_index: 1 }));
    }

    #[test]
    fn test_document_without_sections_is_rejected() {
        let err = parse_response("<html><body><p>hello</p></body></html>").unwrap_err();
        assert!(matches!(err, ParseError::NoSections));
    }

    #[test]
    fn test_garbled_chosen_option_is_rejected() {
        let doc = document(&format!(
            "{}{}",
            section("Physics"),
            panel(Some(1), Some(1)).replace("<td> 1 </td>", "<td> A </td>")
        ));

        let err = parse_response(&doc).unwrap_err();
        assert!(matches!(err, ParseError::InvalidChosenOption { value, .. } if value == "A"));
    }

    #[test]
    fn test_right_answer_takes_first_digit_before_period() {
        let doc = document(&format!(
            r#"{}<div class="question-pnl"><table>
                <tr><td>Chosen Option :</td><td>3</td></tr>
                <tr><td class="bold rightAns">Ans 3. 42.5 metres</td></tr>
            </table></div>"#,
            section("Physics"),
        ));

        let tallies = parse_response(&doc).unwrap();
        assert_eq!(tallies[0].correct_count, 1);
    }

    #[test]
    fn test_chosen_option_inside_nested_layout_tables() {
        let doc = document(&format!(
            r#"{}<div class="question-pnl"><table><tr>
                <td><table><tr><td class="rightAns">2. Newton</td></tr></table></td>
                <td><table>
                    <tr><td>Status :</td><td>Answered</td></tr>
                    <tr><td>Chosen Option :</td><td>2</td></tr>
                </table></td>
            </tr></table></div>"#,
            section("Physics"),
        ));

        let tallies = parse_response(&doc).unwrap();
        assert_eq!(tallies[0].correct_count, 1);
    }

    #[test]
    fn test_extra_classes_are_not_section_markers() {
        let doc = document(&format!(
            r#"{}<div class="section-lbl hidden">Ignored</div>{}"#,
            section("Physics"),
            panel(Some(1), Some(1)),
        ));

        let tallies = parse_response(&doc).unwrap();
        assert_eq!(tallies.len(), 1);
        assert_eq!(tallies[0].correct_count, 1);
    }
}
