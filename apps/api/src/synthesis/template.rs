//! The fixed factbook section template. Position in `SectionTopic::ALL` is
//! the authoritative `section_order`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionTopic {
    CompanyIntroduction,
    MarketAnalysis,
    SelfAnalysis,
    CompetitorAnalysis,
    TargetAudienceAnalysis,
    AdvertisingAnalysis,
}

impl SectionTopic {
    pub const ALL: [SectionTopic; 6] = [
        SectionTopic::CompanyIntroduction,
        SectionTopic::MarketAnalysis,
        SectionTopic::SelfAnalysis,
        SectionTopic::CompetitorAnalysis,
        SectionTopic::TargetAudienceAnalysis,
        SectionTopic::AdvertisingAnalysis,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionTopic::CompanyIntroduction => "Company & brand introduction",
            SectionTopic::MarketAnalysis => "Market analysis",
            SectionTopic::SelfAnalysis => "Self (client) analysis",
            SectionTopic::CompetitorAnalysis => "Competitor analysis",
            SectionTopic::TargetAudienceAnalysis => "Target audience analysis",
            SectionTopic::AdvertisingAnalysis => "Advertising analysis",
        }
    }

    /// 1-based template position.
    pub fn order(self) -> i32 {
        match self {
            SectionTopic::CompanyIntroduction => 1,
            SectionTopic::MarketAnalysis => 2,
            SectionTopic::SelfAnalysis => 3,
            SectionTopic::CompetitorAnalysis => 4,
            SectionTopic::TargetAudienceAnalysis => 5,
            SectionTopic::AdvertisingAnalysis => 6,
        }
    }
}
