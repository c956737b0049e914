//! Built-in sample corpus
//!
//! Five internal documents covering sales, HR, marketing, IT and finance. Used
//! by the CLI and server when no corpus file is configured.

use chrono::NaiveDate;

use crate::models::Document;

/// The built-in enterprise documents, in listing order
#[must_use]
pub fn sample_corpus() -> Vec<Document> {
    vec![
        make_document(
            "doc-001",
            "2024年销售业绩报告",
            "销售数据",
            (2024, 11, 8),
            &["销售", "业绩", "报告", "数据", "本月", "上周", "季度", "收入"],
            r#"# 📊 2024年销售业绩报告

## 本月概览（11月1-8日）
- **总销售额**: ¥2,458,000
- **日均销售**: ¥307,250
- **同比增长**: +23.5% ⬆️
- **环比增长**: +18.2% ⬆️
- **新签客户**: 45 家
- **客户续约率**: 92.3%

## 上周亮点（11月1-7日）
### 整体表现
- 销售额: ¥1,245,000（超目标15%）
- 新客户: 156 个（超目标25%）
- 转化率: 12.8%（提升2.3个百分点）

### 产品线分析
**产品 A** - 主力产品
- 销售额: ¥560,000（占比45%）
- 同比增长: +32%
- 状态: 🔥 热销中

**产品 B** - 稳定产品
- 销售额: ¥373,500（占比30%）
- 同比增长: +18%
- 状态: ✅ 稳定

**产品 C** - 新品
- 销售额: ¥311,250（占比25%）
- 同比增长: +12%
- 状态: 📈 上升期

### 区域分布
- **华东区**: ¥498,000（40%）↑32% 🌟
- **华南区**: ¥373,500（30%）↑20%
- **华北区**: ¥248,500（20%）↑8% ⚠️
- **其他**: ¥125,000（10%）↑15%

## 成就与改进
✅ **主要成就**
- 华东地区突破历史新高
- 企业客户续约率达95%
- 新套餐方案NPS达85分

⚠️ **需要改进**
- 华北地区需加强市场推广
- 客户产品培训体系需完善
- 售后服务响应时间需优化"#,
            "本月销售额¥2,458,000，同比增长23.5%，新签45家客户...",
        ),
        make_document(
            "doc-002",
            "员工休假与福利政策",
            "人力资源",
            (2024, 10, 15),
            &["休假", "年假", "病假", "福利", "请假", "假期", "调休"],
            r#"# 🏖️ 员工休假与福利政策手册

## 年假制度
根据《员工手册 v3.2》第5章：

### 年假天数标准
| 工作年限 | 年假天数 |
|---------|---------|
| 满1年 | 5天 |
| 满3年 | 10天 |
| 满5年 | 15天 |
| 满10年 | 20天 |

### 年假规则
- ✅ 可跨年使用（需在次年3月前用完）
- 💰 未使用年假可折现（按300%薪资计算）
- 📅 可按半天或整天申请
- 🔄 年假可累计但不可透支

## 病假制度
### 病假天数
- 带薪病假：每年最多10天
- 需提供正规医院证明
- 当天请病假需上午10点前通知主管

### 病假待遇
- 1-3天：100%工资
- 4-10天：80%工资
- 超过10天：按国家规定执行

## 其他假期
### 法定假期
- 👫 **婚假**: 3天（晚婚额外7天）
- 👶 **产假**: 158天（含法定98天+延长60天）
- 👨‍👦 **陪产假**: 15天
- 😢 **丧假**: 直系亲属5天，非直系3天

### 特殊假期
- 🎓 **培训假**: 参加公司指定培训
- 🏥 **体检假**: 年度体检1天
- 🚑 **护理假**: 照顾患病直系亲属

## 申请流程
1. 登录HR系统 (hr.synapse.com)
2. 选择假期类型和日期
3. 填写申请原因
4. 提交主管审批
5. 等待HR确认

⏰ **提前时间要求**
- 年假：提前3个工作日
- 病假：当天上午10点前
- 其他：提前1个工作日

## 福利补充
### 弹性工作
- 核心工作时间：10:00-16:00
- 其他时间可弹性安排
- 每月2天居家办公

### 健康福利
- 年度体检（三甲医院）
- 商业医疗保险
- 健身房会员补贴"#,
            "年假5-20天（按工龄），病假10天，婚假3天...",
        ),
        make_document(
            "doc-003",
            "Q3市场营销活动总结",
            "市场营销",
            (2024, 10, 22),
            &["市场", "营销", "推广", "活动", "复盘", "campaign", "ROI"],
            r#"# 📈 2024年Q3市场营销活动总结

## 执行概览
### 核心指标
- ✅ **品牌曝光**: 687万次（目标500万，达成137%）
- ✅ **潜在客户**: 2,847人（目标2000，达成142%）
- ✅ **转化率**: 12.5%（目标10%，达成125%）
- ✅ **投资回报率**: 4.2（目标3.5，达成120%）
- 💰 **营销支出**: ¥1,850,000
- 💵 **带来收入**: ¥7,770,000

## 活动矩阵（共12个主要活动）

### 🎯 产品发布类
**"未来办公" 产品发布会**（9月15日）
- 线上观看人数: 45,238人
- 媒体报道: 23家主流媒体
- 新增注册用户: 1,850人
- 活动ROI: 5.2
- 社交媒体互动: 23,500次
- 🏆 **最佳活动奖**

### ✍️ 内容营销类
**"效率提升" 系列文章**（8篇专题）
- 总阅读量: 68,000次
- 平均停留: 3分42秒
- 转化线索: 420个
- 分享次数: 2,300次
- 收藏人数: 1,850人

### 🎬 视频营销类
**产品使用教程系列**
- 视频播放: 125,000次
- 完播率: 68%（行业平均45%）
- 点赞数: 8,500次
- 评论数: 1,200条

### 📧 EDM营销
**月度Newsletter**
- 发送数: 50,000封
- 打开率: 28%（行业平均22%）
- 点击率: 8.5%（行业平均3.2%）
- 转化率: 2.1%

## 渠道分析
### 表现最佳渠道（TOP 3）
1. **短视频平台** 
   - 获客成本: ¥28/人
   - 转化率: 15.3%
   - ROI: 5.8

2. **微信生态**
   - 获客成本: ¥35/人
   - 转化率: 13.2%
   - ROI: 4.9

3. **内容平台**
   - 获客成本: ¥42/人
   - 转化率: 11.8%
   - ROI: 4.2

## 数据洞察
📊 **关键发现**
- 视频内容表现最佳（观看率+65%）
- 周三、周四发布效果最好
- 短视频平台获客成本最低
- 教程类内容完播率最高
- 用户更喜欢实用型内容

## Q4规划建议
1. 加大短视频内容投入
2. 优化发布时间策略
3. 增加互动型活动
4. 深化客户案例营销
5. 建立KOL合作矩阵"#,
            "Q3执行12个活动，获客2,847人，ROI达4.2...",
        ),
        make_document(
            "doc-004",
            "IT设备与技术支持指南",
            "IT支持",
            (2024, 11, 5),
            &["IT", "设备", "报修", "电脑", "技术", "支持", "故障", "网络"],
            r#"# 🔧 IT设备与技术支持指南

## 快速报修

### 📱 在线报修（推荐）
1. 访问 **it.synapse.com**
2. 点击「设备报修」按钮
3. 选择设备类型
4. 描述故障现象
5. 上传问题截图/照片
6. 提交工单

### ☎️ 电话报修
- **IT热线**: 内线8888
- **工作时间**: 周一至周五 9:00-18:00
- **下班时间**: 紧急故障转分机8899

## 响应时间SLA

| 优先级 | 响应时间 | 解决时间 | 示例 |
|-------|---------|---------|------|
| 🔴 P0-危急 | 15分钟 | 2小时 | 服务器宕机、网络中断 |
| 🟠 P1-紧急 | 1小时 | 4小时 | 无法登录系统、邮件故障 |
| 🟠 P2-普通 | 4小时 | 1工作日 | 软件问题、打印机故障 |
| 🟢 P3-低 | 1工作日 | 3工作日 | 优化建议、功能咨询 |

## 常见问题自助解决

### 💻 电脑卡顿
**解决步骤：**
1. 按 Ctrl+Shift+Esc 打开任务管理器
2. 查看CPU、内存占用情况
3. 结束不必要的进程
4. 重启电脑
5. 如仍未解决，联系IT部门

**预防措施：**
- 定期清理磁盘垃圾
- 关闭自启动程序
- 保持系统更新

### 🌐 网络无法连接
**排查清单：**
- ✅ 检查网线是否插好
- ✅ 查看路由器指示灯
- ✅ 重启网络适配器
- ✅ 检查WiFi是否连接
- ✅ 尝试访问其他网站
- ✅ 重启路由器

### 🖨️ 打印机故障
**常见问题：**
- 无法打印 → 检查连接和驱动
- 打印模糊 → 清洁打印头
- 卡纸 → 按说明取出卡纸
- 无墨水 → 更换墨盒

## 软件与系统

### 📦 软件安装申请
1. 登录IT服务平台
2. 选择「软件安装申请」
3. 填写软件名称和用途
4. 等待主管审批
5. IT部门远程安装

### 🔐 VPN配置
**Windows系统：**
1. 下载VPN客户端
2. 使用域账号登录
3. 选择公司服务器
4. 连接即可

**Mac系统：**
1. 系统偏好设置 > 网络
2. 添加VPN配置
3. 输入服务器地址
4. 使用域账号登录

### 🗂️ 文件共享
**访问共享文件夹：**
- 路径: \\fileserver\share
- 使用域账号登录
- 按权限访问对应文件夹

## 设备申请

### 💻 新设备申请流程
1. 确认设备需求
2. 提交申请（附加理由）
3. 部门主管审批
4. IT部门评估
5. 采购部门执行
6. 设备配置与发放

### ⏰ 申请时效
- 标准配置：5个工作日
- 特殊配置：10个工作日
- 紧急需求：3个工作日（需总监审批）

## IT服务团队
- **位置**: 3楼东侧
- **服务时间**: 工作日 9:00-18:00
- **团队人数**: 8人
- **平均满意度**: 4.8/5.0"#,
            "在线报修 it.synapse.com，响应时间15分钟-1工作日...",
        ),
        make_document(
            "doc-005",
            "费用报销操作手册",
            "财务管理",
            (2024, 11, 1),
            &["报销", "费用", "差旅", "发票", "财务", "预算", "审批"],
            r#"# 💰 费用报销操作手册

## 可报销费用类型

### ✈️ 差旅费用
**交通费**
- 飞机：经济舱（国内）、经济舱或商务舱（国际超8小时）
- 高铁：二等座
- 出租车：有发票即可
- 网约车：行程单+发票

**住宿费标准**
| 城市等级 | 限额 | 备注 |
|---------|------|------|
| 北上广深 | ¥600/晚 | 一线城市 |
| 省会城市 | ¥400/晚 | 新一线城市 |
| 其他城市 | ¥300/晚 | 二三线城市 |

**餐饮费**
- 标准：¥100/天
- 包含：早中晚餐
- 不含：酒水、娱乐

### 📝 办公费用
- 文具用品：≤¥500/次，无需预批
- 办公设备：≤¥2000/次，需主管批准
- 打印耗材：按需申请

### 🎓 培训费用
- 内部培训：全额报销
- 外部培训：需提前申请
- 职业认证：通过后报销80%

### 🎉 团建活动
- 标准：¥200/人/次
- 频率：每季度1次
- 需提前申请和预算

## 报销流程

### 📋 标准流程
1. **登录系统**
   - 访问 finance.synapse.com
   - 使用域账号登录

2. **创建报销单**
   - 点击「新建报销」
   - 选择报销类型
   - 填写基本信息

3. **上传凭证**
   - 拍摄清晰的发票照片
   - 支持格式：JPG、PNG、PDF
   - 单张≤5MB

4. **填写明细**
   - 费用日期
   - 费用类型
   - 金额
   - 事由说明

5. **提交审批**
   - 检查信息准确性
   - 点击「提交审批」
   - 等待审批流程

### 🔄 审批流程
- 员工提交
- 直属主管审批（1个工作日）
- 财务审核（1-2个工作日）
- 总经理审批（金额>5000元）
- 财务付款（3-5个工作日）

## 发票要求

### ✅ 合规发票
- 增值税普通发票或专用发票
- 发票抬头：正确的公司名称
- 税号：统一社会信用代码
- 发票内容：明确的项目名称
- 开票日期：3个月内

### ❌ 不可报销
- 无发票或白条
- 发票抬头错误
- 已过期发票（超3个月）
- 个人消费发票
- 虚假发票

## 报销时效

### ⏰ 时间要求
- **普通费用**: 发生后3个月内
- **跨年费用**: 次年1月15日前
- **项目费用**: 项目结束后1个月内

### 🚫 逾期处理
- 超期未报销视为自动放弃
- 特殊情况需书面说明
- 需总监以上审批

## 付款方式

### 💳 到账时间
- 审批通过后：3-5个工作日
- 紧急报销：1-2个工作日（需特批）
- 跨月报销：次月5日前

### 🏦 收款账户
- 默认：工资卡
- 可修改：需提前在系统中绑定

## 常见问题

### Q: 发票遗失怎么办？
A: 联系开票方重新开具，或提供发票存根复印件+情况说明

### Q: 如何查询报销进度？
A: 登录系统「我的报销」查看实时状态

### Q: 金额超标怎么处理？
A: 需在申请时说明原因，等待特批，超出部分可能自费

### Q: 可以代他人报销吗？
A: 不可以，必须本人提交报销申请"#,
            "差旅、办公、培训费用可报销，3-5工作日到账...",
        ),
    ]
}

fn make_document(
    id: &str,
    title: &str,
    category: &str,
    (year, month, day): (i32, u32, u32),
    keywords: &[&str],
    content: &str,
    snippet: &str,
) -> Document {
    Document {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        last_updated: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        keywords: keywords.iter().map(ToString::to_string).collect(),
        content: content.to_string(),
        snippet: snippet.to_string(),
    }
}
