//! Prompt text for brand/manufacturer inference.

use crate::types::answer::NO_MATCH;

/// System instruction: catalog-classification rules the model must follow.
pub fn system_policy() -> String {
    format!(
        "あなたは商品分類の専門家です。正確性を重視してください。\n\
         以下のルールに従ってブランド名とメーカー名を判定してください。\n\
         - 色、素材、サイズ、商品カテゴリ名はブランドではありません。\n\
         - ブランドは必ず1つのメーカーに属します。メーカーは1社のみ回答してください。\n\
         - 根拠が不十分でブランドを特定できない場合は、推測せずブランドを「{NO_MATCH}」としてください。"
    )
}

/// User message: the product name, the search evidence, and the answer
/// template the parser expects.
pub fn user_prompt(product_name: &str, evidence: &str) -> String {
    format!(
        "以下の商品情報と検索結果から、ブランド名とメーカー名をできる限り正確に推定してください。\n\
         \n\
         商品名：{product_name}\n\
         \n\
         【検索結果】\n\
         {evidence}\n\
         \n\
         【出力形式】\n\
         ブランド：\n\
         メーカー：\n\
         理由："
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_policy_names_no_match_value() {
        assert!(system_policy().contains("「該当なし」"));
    }

    #[test]
    fn test_user_prompt_embeds_inputs_and_template() {
        let prompt = user_prompt("アタック 本体", "アタック | 花王\n衣料用洗剤");
        assert!(prompt.contains("商品名：アタック 本体"));
        assert!(prompt.contains("アタック | 花王\n衣料用洗剤"));
        assert!(prompt.ends_with("ブランド：\nメーカー：\n理由："));
    }
}
