//! Retrieval method descriptors.
//!
//! The catalog is a closed set: every retrieval strategy the backend
//! understands is a `RagMethod` variant, and each variant owns exactly one
//! static `RagMethodDescriptor`.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Which side of the pipeline a method optimizes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RagCategory {
    /// Document-side: chunking, enrichment, index structure.
    Doc,
    /// Query-side: rewriting, reranking, verification.
    Query,
}

/// Identifier of a retrieval method, serialized as the backend's
/// `option<N>` key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Default,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum RagMethod {
    #[default]
    #[serde(rename = "option1")]
    #[strum(serialize = "option1")]
    SimpleRag,
    #[serde(rename = "option2")]
    #[strum(serialize = "option2")]
    SemanticChunking,
    #[serde(rename = "option3")]
    #[strum(serialize = "option3")]
    ContextEnrichedRetrieval,
    #[serde(rename = "option4")]
    #[strum(serialize = "option4")]
    ContextualChunkHeaders,
    #[serde(rename = "option5")]
    #[strum(serialize = "option5")]
    DocumentAugmentation,
    #[serde(rename = "option6")]
    #[strum(serialize = "option6")]
    QueryTransformation,
    #[serde(rename = "option7")]
    #[strum(serialize = "option7")]
    Reranker,
    #[serde(rename = "option8")]
    #[strum(serialize = "option8")]
    Rse,
    #[serde(rename = "option9")]
    #[strum(serialize = "option9")]
    FeedbackLoop,
    #[serde(rename = "option10")]
    #[strum(serialize = "option10")]
    AdaptiveRag,
    #[serde(rename = "option11")]
    #[strum(serialize = "option11")]
    SelfRag,
    #[serde(rename = "option12")]
    #[strum(serialize = "option12")]
    KnowledgeGraph,
    #[serde(rename = "option13")]
    #[strum(serialize = "option13")]
    HierarchicalIndices,
    #[serde(rename = "option14")]
    #[strum(serialize = "option14")]
    HyDe,
    #[serde(rename = "option15")]
    #[strum(serialize = "option15")]
    Fusion,
    #[serde(rename = "option16")]
    #[strum(serialize = "option16")]
    Crag,
    #[serde(rename = "option17")]
    #[strum(serialize = "option17")]
    MultiModalRag,
}

impl RagMethod {
    /// Returns the static descriptor for this method.
    pub fn descriptor(self) -> &'static RagMethodDescriptor {
        // CATALOG is declared in variant order.
        &CATALOG[self as usize]
    }

    /// Returns the `option<N>` identifier sent to the backend.
    pub fn id(self) -> &'static str {
        self.descriptor().id
    }

    /// Iterates all methods in catalog order.
    pub fn all() -> impl Iterator<Item = RagMethod> {
        RagMethod::iter()
    }
}

/// Immutable description of one retrieval method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RagMethodDescriptor {
    pub method: RagMethod,
    pub id: &'static str,
    pub ordinal: u8,
    pub short_name: &'static str,
    pub full_name: &'static str,
    pub category: RagCategory,
    /// Strategy key the backend uses internally for this method.
    pub strategy_key: &'static str,
    pub description: &'static str,
    pub usage_scenarios: &'static [&'static str],
    pub example_documents: &'static [&'static str],
}

/// The fixed, ordered catalog of retrieval methods.
pub static CATALOG: [RagMethodDescriptor; 17] = [
    RagMethodDescriptor {
        method: RagMethod::SimpleRag,
        id: "option1",
        ordinal: 1,
        short_name: "SimpleRAG",
        full_name: "SimpleRAG（简单切块）",
        category: RagCategory::Doc,
        strategy_key: "simple",
        description: "按固定长度切块后直接做向量检索，再把命中的片段交给模型生成回答。",
        usage_scenarios: &["结构简单的短文档", "快速搭建基线效果"],
        example_documents: &["产品 FAQ", "会议纪要"],
    },
    RagMethodDescriptor {
        method: RagMethod::SemanticChunking,
        id: "option2",
        ordinal: 2,
        short_name: "Semantic Chunking",
        full_name: "Semantic Chunking（语义切块）",
        category: RagCategory::Doc,
        strategy_key: "semantic_chunking",
        description: "按语义边界而不是固定长度切分文档，检索时召回更多候选片段。",
        usage_scenarios: &["段落长度差异大的文档", "主题频繁切换的长文"],
        example_documents: &["技术白皮书", "研究报告"],
    },
    RagMethodDescriptor {
        method: RagMethod::ContextEnrichedRetrieval,
        id: "option3",
        ordinal: 3,
        short_name: "Context Enriched",
        full_name: "Context Enriched Retrieval（上下文增强检索）",
        category: RagCategory::Doc,
        strategy_key: "context_enriched",
        description: "命中片段时一并带上相邻片段，补全被切断的上下文。",
        usage_scenarios: &["前后文依赖强的叙述性文本", "跨段落推理"],
        example_documents: &["小说章节", "操作手册"],
    },
    RagMethodDescriptor {
        method: RagMethod::ContextualChunkHeaders,
        id: "option4",
        ordinal: 4,
        short_name: "Chunk Headers",
        full_name: "Contextual Chunk Headers（上下文分块标题）",
        category: RagCategory::Doc,
        strategy_key: "chunk_headers",
        description: "为每个片段附加所属文档与章节标题，检索和生成时保留层级信息。",
        usage_scenarios: &["章节层级清晰的文档", "需要定位出处的问答"],
        example_documents: &["法规条文", "API 文档"],
    },
    RagMethodDescriptor {
        method: RagMethod::DocumentAugmentation,
        id: "option5",
        ordinal: 5,
        short_name: "Doc Augmentation",
        full_name: "Document Augmentation（文档增强）",
        category: RagCategory::Doc,
        strategy_key: "doc_augmentation",
        description: "为片段预先生成可能的问题和摘要，扩大可被检索到的表达方式。",
        usage_scenarios: &["用户提问措辞多样", "术语与口语差异大"],
        example_documents: &["客服知识库", "培训材料"],
    },
    RagMethodDescriptor {
        method: RagMethod::QueryTransformation,
        id: "option6",
        ordinal: 6,
        short_name: "Query Transform",
        full_name: "Query Transformation（查询转换）",
        category: RagCategory::Query,
        strategy_key: "query_transform",
        description: "先由模型改写或拆分用户问题，再用改写后的查询检索。",
        usage_scenarios: &["问题表述模糊", "一个问题包含多个子问题"],
        example_documents: &["综合性知识库", "多主题文档集"],
    },
    RagMethodDescriptor {
        method: RagMethod::Reranker,
        id: "option7",
        ordinal: 7,
        short_name: "Reranker",
        full_name: "Reranker（重排序）",
        category: RagCategory::Query,
        strategy_key: "reranker",
        description: "先宽召回，再按与问题的相关度重新排序，只保留最相关的片段。",
        usage_scenarios: &["候选片段多且噪声大", "对答案精度要求高"],
        example_documents: &["大型文档库", "论文集合"],
    },
    RagMethodDescriptor {
        method: RagMethod::Rse,
        id: "option8",
        ordinal: 8,
        short_name: "RSE",
        full_name: "RSE（语义扩展重排序）",
        category: RagCategory::Query,
        strategy_key: "rse",
        description: "扩展查询语义后检索，并把相关片段拼接成连续段落再排序。",
        usage_scenarios: &["答案分散在连续多个片段", "需要较长证据段落"],
        example_documents: &["合同全文", "长篇报告"],
    },
    RagMethodDescriptor {
        method: RagMethod::FeedbackLoop,
        id: "option9",
        ordinal: 9,
        short_name: "Feedback Loop",
        full_name: "Feedback Loop（反馈闭环）",
        category: RagCategory::Query,
        strategy_key: "feedback_loop",
        description: "根据历史反馈调整检索结果的权重，持续改进回答质量。",
        usage_scenarios: &["长期使用的内部知识库", "可收集用户评价的场景"],
        example_documents: &["内部 Wiki", "工单记录"],
    },
    RagMethodDescriptor {
        method: RagMethod::AdaptiveRag,
        id: "option10",
        ordinal: 10,
        short_name: "Adaptive RAG",
        full_name: "Adaptive RAG（自适应检索增强生成）",
        category: RagCategory::Query,
        strategy_key: "adaptive_rag",
        description: "先判断问题类型，再为事实型、分析型或观点型问题选择不同检索策略。",
        usage_scenarios: &["问题类型混杂", "同一知识库服务多种需求"],
        example_documents: &["企业知识库", "教学资料"],
    },
    RagMethodDescriptor {
        method: RagMethod::SelfRag,
        id: "option11",
        ordinal: 11,
        short_name: "Self RAG",
        full_name: "Self RAG（自反思检索增强生成）",
        category: RagCategory::Query,
        strategy_key: "self_rag",
        description: "生成后由模型自我评估回答是否被检索内容支撑，不足时重新检索。",
        usage_scenarios: &["不允许编造的问答", "事实核查"],
        example_documents: &["医疗指南", "财务制度"],
    },
    RagMethodDescriptor {
        method: RagMethod::KnowledgeGraph,
        id: "option12",
        ordinal: 12,
        short_name: "Knowledge Graph",
        full_name: "Knowledge Graph（知识图谱）",
        category: RagCategory::Doc,
        strategy_key: "knowledge_graph",
        description: "从文档抽取实体与关系，沿关系检索关联知识。",
        usage_scenarios: &["实体关系密集", "多跳关联问题"],
        example_documents: &["组织架构文档", "产品依赖说明"],
    },
    RagMethodDescriptor {
        method: RagMethod::HierarchicalIndices,
        id: "option13",
        ordinal: 13,
        short_name: "Hierarchical",
        full_name: "Hierarchical Indices（层次化索引）",
        category: RagCategory::Doc,
        strategy_key: "hierarchical",
        description: "先在摘要层定位相关文档或章节，再在细粒度片段中检索。",
        usage_scenarios: &["文档数量多且篇幅长", "先定位再细查"],
        example_documents: &["书籍合集", "项目归档资料"],
    },
    RagMethodDescriptor {
        method: RagMethod::HyDe,
        id: "option14",
        ordinal: 14,
        short_name: "HyDE",
        full_name: "HyDE（假设文档嵌入）",
        category: RagCategory::Query,
        strategy_key: "hyde",
        description: "先让模型写出假设答案，用假设答案的向量去检索真实文档。",
        usage_scenarios: &["问题很短而文档很长", "查询与文档表达差异大"],
        example_documents: &["学术论文", "专业教材"],
    },
    RagMethodDescriptor {
        method: RagMethod::Fusion,
        id: "option15",
        ordinal: 15,
        short_name: "Fusion",
        full_name: "Fusion（融合检索）",
        category: RagCategory::Query,
        strategy_key: "fusion",
        description: "同时进行关键词检索与向量检索，融合两路结果排序。",
        usage_scenarios: &["包含大量专有名词", "精确匹配与语义匹配都重要"],
        example_documents: &["产品型号手册", "代码文档"],
    },
    RagMethodDescriptor {
        method: RagMethod::Crag,
        id: "option16",
        ordinal: 16,
        short_name: "CRAG",
        full_name: "CRAG（纠错型 RAG）",
        category: RagCategory::Query,
        strategy_key: "crag",
        description: "校验检索到的上下文是否相关，不相关时纠正或改用其他知识来源。",
        usage_scenarios: &["知识库覆盖不完整", "需要识别检索失败"],
        example_documents: &["新闻资料", "快速变化的政策文件"],
    },
    RagMethodDescriptor {
        method: RagMethod::MultiModalRag,
        id: "option17",
        ordinal: 17,
        short_name: "Multi-Modal",
        full_name: "Multi-Modal RAG（多模态检索增强生成）",
        category: RagCategory::Doc,
        strategy_key: "multimodal",
        description: "结合文本与表格、图片等内容回答，必要时提示查看源文件。",
        usage_scenarios: &["含大量表格或图片的文档", "扫描件资料"],
        example_documents: &["财务报表", "产品说明书"],
    },
];
